pub use self::{
    http::{HTTP, SECRET_HEADER},
    upstream::{call, Upstream},
};

mod http;
mod upstream;

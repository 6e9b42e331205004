mod requests;

pub use requests::{LoginRequest, PostForm, RegisterRequest};

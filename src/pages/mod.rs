pub mod chat;
pub mod signin;
pub mod signup;

pub mod contact;
pub mod integration;
pub mod joint;

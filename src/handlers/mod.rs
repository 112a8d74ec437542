pub mod author;
pub mod blog;
pub mod comment;
pub mod contact;
pub mod email;
pub mod health;

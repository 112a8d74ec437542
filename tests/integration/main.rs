mod common;

mod blog;
mod comments;
mod contact;
mod email_admin;
mod health;

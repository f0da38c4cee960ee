pub mod user_email;

pub mod user_management;

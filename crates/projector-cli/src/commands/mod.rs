pub mod add;
pub mod delete;
pub mod r#do;
pub mod init;
pub mod list;
pub mod project;
pub mod show;

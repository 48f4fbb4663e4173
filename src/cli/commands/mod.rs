mod delete;
mod init;
mod migrate;
mod show;
mod status;

pub use delete::cmd_delete;
pub use init::cmd_init;
pub use migrate::cmd_migrate;
pub use show::cmd_show_film;
pub use status::cmd_status;

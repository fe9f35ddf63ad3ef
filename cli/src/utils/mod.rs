pub mod io;

pub use io::{init_env_logger, read_from_stdin, read_payload, read_token_from_stdin};

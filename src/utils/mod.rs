pub mod arguments;

pub use arguments::{parse_json_args, resolve_function, ArgumentParseError, ArgumentParser};

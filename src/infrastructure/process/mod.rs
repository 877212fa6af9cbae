pub mod command_executor;
pub mod platform;
pub mod tokenizer;

pub use command_executor::{
    CommandExecutor,
    CommandRunner,
    CommandSpec,
    ExecutionMode,
    ExecutionResult,
    OutputCharset,
    DEFAULT_TIMEOUT,
};
pub use platform::Platform;
pub use tokenizer::{join_args, quote_arg, tokenize};

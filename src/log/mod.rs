pub mod buffered;
pub mod file_sink;
pub mod format;
pub mod immediate;
pub mod log_level;
pub mod log_macros;
pub mod log_msg;
pub mod log_sink;
pub mod logger;
pub mod noop_log_sink;
pub mod registry;
pub mod shared_buffer;
pub mod stream_sink;

pub use buffered::{BufferedFileLogger, BufferedLogger, BufferedStreamLogger};
pub use file_sink::FileSink;
pub use format::format_line;
pub use immediate::ImmediateLogger;
pub use log_level::{Priority, priority_label};
pub use log_msg::Message;
pub use log_sink::{LogSink, SinkError};
pub use logger::Logger;
pub use noop_log_sink::NoopSink;
pub use registry::{
    LoggerRegistry, flush, get, global, init, priority, set_priority, teardown, write,
};
pub use shared_buffer::SharedBuffer;
pub use stream_sink::StreamSink;

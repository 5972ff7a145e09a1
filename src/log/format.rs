//! Line rendering shared by every sink.
//!
//! Layout: `YYYY.MM.DD hh:mm:ss<TAB>Label<TAB>body<TAB>file<TAB>line<LF>`,
//! local time, every date/time field after the year zero-padded to two
//! digits. An unknown call-site line renders as `-1`.

use std::fmt::Write;

use crate::log::log_msg::Message;

/// `chrono` pattern for the leading timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Sentinel rendered in place of an unknown source line.
pub const UNKNOWN_LINE: i64 = -1;

/// Renders one message as a newline-terminated line.
#[must_use]
pub fn format_line(msg: &Message) -> String {
    let mut line = String::with_capacity(msg.body().len() + msg.source_file().len() + 48);
    // Writing into a String cannot fail.
    let _ = writeln!(
        line,
        "{}\t{}\t{}\t{}\t{}",
        msg.timestamp().format(TIMESTAMP_FORMAT),
        msg.priority().label(),
        msg.body(),
        msg.source_file(),
        msg.source_line().map_or(UNKNOWN_LINE, i64::from),
    );
    line
}

/// Renders a batch in order.
#[must_use]
pub fn format_batch(messages: &[Message]) -> Vec<String> {
    messages.iter().map(format_line).collect()
}

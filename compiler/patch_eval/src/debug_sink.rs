//! Destinations for `debug.log` output.
//!
//! Enum dispatch like the rest of the evaluator; hosts that need their own
//! handling use [`DebugSink::Custom`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::Value;

/// Prints every logged value to stdout.
#[derive(Default)]
pub struct StdoutDebugSink;

impl StdoutDebugSink {
    pub fn log(&self, value: &Value) {
        println!("Debug from patch: {value}");
    }
}

/// Captures logged values, one line each.
#[derive(Default)]
pub struct BufferDebugSink {
    buffer: Mutex<String>,
}

impl BufferDebugSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self, value: &Value) {
        let mut buffer = self.buffer.lock();
        buffer.push_str(&value.to_string());
        buffer.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum DebugSink {
    Stdout(StdoutDebugSink),
    Buffer(BufferDebugSink),
    /// Discards everything.
    Silent,
    Custom(Box<dyn Fn(&Value) + Send + Sync>),
}

impl DebugSink {
    pub fn log(&self, value: &Value) {
        match self {
            Self::Stdout(sink) => sink.log(value),
            Self::Buffer(sink) => sink.log(value),
            Self::Silent => {}
            Self::Custom(sink) => sink(value),
        }
    }

    /// Captured output; empty for sinks that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(sink) => sink.get_output(),
            Self::Stdout(_) | Self::Silent | Self::Custom(_) => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(sink) = self {
            sink.clear();
        }
    }
}

pub type SharedDebugSink = Arc<DebugSink>;

pub fn stdout_sink() -> SharedDebugSink {
    Arc::new(DebugSink::Stdout(StdoutDebugSink))
}

pub fn buffer_sink() -> SharedDebugSink {
    Arc::new(DebugSink::Buffer(BufferDebugSink::new()))
}

pub fn silent_sink() -> SharedDebugSink {
    Arc::new(DebugSink::Silent)
}

pub fn custom_sink(sink: impl Fn(&Value) + Send + Sync + 'static) -> SharedDebugSink {
    Arc::new(DebugSink::Custom(Box::new(sink)))
}

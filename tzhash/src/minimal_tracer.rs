// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{fmt, sync::atomic::AtomicUsize, write};

use std::fmt::Write;
use tracing::Level;
use tracing::{field::Visit, Id, Subscriber};
use tracing_core::Field;
use tzhash_core::environment;

pub struct StringVisitor<'a> {
    string: &'a mut String,
}
impl<'a> StringVisitor<'a> {
    pub(crate) fn new(string: &'a mut String) -> Self {
        StringVisitor { string }
    }
}

impl<'a> Visit for StringVisitor<'a> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.string, "{value:?} ");
        } else {
            let _ = write!(self.string, "{} = {:?}; ", field.name(), value);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct LogFilter {
    target: Option<String>,
    level: Option<Level>,
}

impl LogFilter {
    fn matches(&self, level: &Level, target: &str) -> bool {
        if let Some(max) = &self.level {
            // More verbose levels compare greater
            if level > max {
                return false;
            }
        }
        if let Some(prefix) = &self.target {
            if !target.starts_with(prefix.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Writes events to stderr; stdout is reserved for the generated table.
pub struct MinimalTracer {
    enabled: bool,
    filters: Vec<LogFilter>,
}

fn string_to_level(string: &str) -> Option<Level> {
    match string.to_lowercase().as_str() {
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "warn" | "warning" => Some(Level::WARN),
        "trace" => Some(Level::TRACE),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Parse `level`, `target` and `target=level` items separated by commas.
fn parse_filters(value: &str) -> Vec<LogFilter> {
    let mut filters = Vec::with_capacity(4);
    for filter in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let (target, level) = match filter.split_once('=') {
            Some((target, level)) => (Some(target), string_to_level(level)),
            None => match string_to_level(filter) {
                Some(level) => (None, Some(level)),
                None => (Some(filter), None),
            },
        };
        filters.push(LogFilter {
            target: target.map(|v| v.to_string()),
            level,
        });
    }
    filters
}

impl MinimalTracer {
    fn new(filter: Option<&str>) -> Self {
        match filter {
            Some(value) => MinimalTracer {
                enabled: true,
                filters: parse_filters(value),
            },
            None => MinimalTracer {
                enabled: false,
                filters: Vec::new(),
            },
        }
    }

    pub fn register() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let filter = environment::log_filter();
        tracing::subscriber::set_global_default(MinimalTracer::new(filter.as_deref()))
    }

    fn is_enabled(&self, level: &Level, target: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.filters.is_empty() || self.filters.iter().any(|f| f.matches(level, target))
    }
}

static AUTO_ID: AtomicUsize = AtomicUsize::new(1);

impl Subscriber for MinimalTracer {
    fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
        self.is_enabled(metadata.level(), metadata.target())
    }

    fn new_span(&self, _span: &tracing_core::span::Attributes<'_>) -> tracing_core::span::Id {
        Id::from_u64(AUTO_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed) as u64)
    }

    fn record(&self, _span: &tracing_core::span::Id, _values: &tracing_core::span::Record<'_>) {}

    fn record_follows_from(
        &self,
        _span: &tracing_core::span::Id,
        _follows: &tracing_core::span::Id,
    ) {
    }

    fn event(&self, event: &tracing::Event<'_>) {
        let metadata = event.metadata();

        let level = metadata.level();
        let target = metadata.target();

        let mut text = String::new();

        let mut visitor = StringVisitor::new(&mut text);
        event.record(&mut visitor);

        eprintln!("{level} {target}: {text}");
    }

    fn enter(&self, _span: &tracing_core::span::Id) {}

    fn exit(&self, _span: &tracing_core::span::Id) {}
}

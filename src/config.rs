//! Configuration root and top-level orchestration
//!
//! [`Config::parse`] drives the whole construction: read the document tree,
//! walk the root children (format-option leaves plus the `outputs`
//! container), run the cross-output validation, and wrap any inner failure
//! into the single public diagnostic. Construction is atomic; a failed parse
//! leaves no partially built value behind.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, ParseError, Result};
use crate::format::{FormatOptions, ProtocolStyle, TcpFlagsStyle, TimestampStyle};
use crate::node;
use crate::outputs::OutputCollection;
use crate::parse::parse_outputs;
use crate::validate::choose_two;

/// A fully validated export-pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Record formatting options
    pub format: FormatOptions,

    /// Configured output sinks
    pub outputs: OutputCollection,
}

impl Config {
    /// Parse and validate a configuration document.
    ///
    /// # Example
    ///
    /// ```
    /// use flowsink_config::Config;
    ///
    /// let config = Config::parse("outputs:\n  - print:\n      name: stdout\n").unwrap();
    /// assert_eq!(config.outputs.prints[0].name, "stdout");
    /// ```
    pub fn parse(document: &str) -> std::result::Result<Self, ConfigError> {
        let config = Self::parse_inner(document)?;
        debug!(outputs = config.outputs.len(), "configuration parsed");
        Ok(config)
    }

    /// Read a configuration document from a file and parse it.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&document)
    }

    fn parse_inner(document: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(document)?;

        let mut format = FormatOptions::default();
        let mut outputs: Option<OutputCollection> = None;

        for (tag, child) in node::children(&root, "configuration")? {
            match tag {
                "tcp_flags" => {
                    let raw = node::string(child, "tcp_flags", "configuration")?;
                    format.tcp_flags = if choose_two("tcp_flags", raw, "formatted", "raw")? {
                        TcpFlagsStyle::Formatted
                    } else {
                        TcpFlagsStyle::Raw
                    };
                }
                "timestamp" => {
                    let raw = node::string(child, "timestamp", "configuration")?;
                    format.timestamp = if choose_two("timestamp", raw, "formatted", "unix")? {
                        TimestampStyle::Formatted
                    } else {
                        TimestampStyle::Unix
                    };
                }
                "protocol" => {
                    let raw = node::string(child, "protocol", "configuration")?;
                    format.protocol = if choose_two("protocol", raw, "formatted", "raw")? {
                        ProtocolStyle::Formatted
                    } else {
                        ProtocolStyle::Raw
                    };
                }
                "ignore_unknown" => {
                    format.ignore_unknown = node::boolean(child, "ignore_unknown", "configuration")?;
                }
                "ignore_options" => {
                    format.ignore_options = node::boolean(child, "ignore_options", "configuration")?;
                }
                "non_printable" => {
                    format.non_printable = node::boolean(child, "non_printable", "configuration")?;
                }
                "numeric_names" => {
                    format.numeric_names = node::boolean(child, "numeric_names", "configuration")?;
                }
                "octet_array_as_uint" => {
                    format.octet_array_as_uint =
                        node::boolean(child, "octet_array_as_uint", "configuration")?;
                }
                "split_biflow" => {
                    format.split_biflow = node::boolean(child, "split_biflow", "configuration")?;
                }
                "detailed_info" => {
                    format.detailed_info = node::boolean(child, "detailed_info", "configuration")?;
                }
                "template_info" => {
                    format.template_info = node::boolean(child, "template_info", "configuration")?;
                }
                "outputs" => outputs = Some(parse_outputs(child)?),
                other => {
                    return Err(ParseError::UnexpectedElement {
                        element: other.to_string(),
                        context: "configuration",
                    });
                }
            }
        }

        let outputs = outputs.ok_or(ParseError::MissingOutputs)?;
        outputs.validate()?;

        Ok(Self { format, outputs })
    }
}

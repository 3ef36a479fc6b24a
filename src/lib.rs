//! flowsink-config
//!
//! Schema-driven parsing and validation of the output-sink configuration of
//! a flow-record export pipeline. A declarative YAML document goes in; a
//! fully validated, immutable [`Config`] comes out — or exactly one
//! diagnostic explaining why it was rejected.
//!
//! # Example
//!
//! ```
//! use flowsink_config::{Config, SendProtocol};
//!
//! let config = Config::parse(
//!     r#"
//! timestamp: unix
//! outputs:
//!   - send:
//!       name: exporter
//!       ip: "10.0.0.1"
//!       protocol: tcp
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.outputs.sends[0].protocol, SendProtocol::Tcp);
//! ```
//!
//! Construction is all-or-nothing: any structural, range, or cross-output
//! violation aborts the whole parse and no partially populated value is
//! observable.

pub mod config;
pub mod error;
pub mod format;
pub mod outputs;
pub mod validate;

mod node;
mod parse;

pub use config::Config;
pub use error::{ConfigError, ParseError};
pub use format::{FormatOptions, ProtocolStyle, TcpFlagsStyle, TimestampStyle};
pub use outputs::{
    Compression, FileOutput, HostnameMode, KafkaOutput, KafkaPartition, OutputCollection,
    PrintOutput, SendOutput, SendProtocol, ServerOutput, SyslogOutput, SyslogPriority,
    SyslogTransport, TcpTransport, UdpTransport,
};

//! Error types for flowsink-config

use thiserror::Error;

/// Result type alias used by the internal parsers
pub(crate) type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while parsing and validating a configuration document.
///
/// Variants carry the context needed to render a precise diagnostic; they
/// are only turned into the single public message by [`ConfigError`].
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document reader rejected the input before any schema rules ran
    #[error("{0}")]
    Document(#[from] serde_yaml::Error),

    /// A child element that the surrounding context does not know about
    #[error("unexpected element '{element}' within '{context}'")]
    UnexpectedElement {
        /// Tag of the offending child
        element: String,
        /// Context (output kind or sub-block) that rejected it
        context: &'static str,
    },

    /// A node that should be a mapping of labeled children is not one
    #[error("'{context}' must be a mapping of elements")]
    NotAMapping {
        /// Context that expected a mapping
        context: &'static str,
    },

    /// A node that should be a sequence is not one
    #[error("'{context}' must be a sequence")]
    NotASequence {
        /// Context that expected a sequence
        context: &'static str,
    },

    /// A scalar child holds the wrong type of value
    #[error("element '{element}' within '{context}' must be a {expected}")]
    WrongType {
        /// Tag of the child
        element: &'static str,
        /// Context holding the child
        context: &'static str,
        /// Human name of the expected scalar type
        expected: &'static str,
    },

    /// The document root has no `outputs` section
    #[error("the 'outputs' section must be defined")]
    MissingOutputs,

    /// An output was declared without a (non-empty) name
    #[error("name of a '{kind}' output must be defined")]
    MissingName {
        /// Output kind
        kind: &'static str,
    },

    /// A mandatory element of some block was never supplied
    #[error("element '{element}' of a {context} must be defined")]
    MissingField {
        /// Tag of the absent element
        element: &'static str,
        /// Block it belongs to, e.g. "'server' output"
        context: &'static str,
    },

    /// Port number out of the 1..=65535 range
    #[error("invalid port number of a {context}")]
    InvalidPort {
        /// Block the port belongs to
        context: &'static str,
    },

    /// Two-word choice element with an unrecognized value
    #[error("unexpected value '{value}' of the element '{element}' (expected '{accept}' or '{reject}')")]
    InvalidChoice {
        /// Tag of the element
        element: String,
        /// Offending value
        value: String,
        /// Word mapping to `true`
        accept: String,
        /// Word mapping to `false`
        reject: String,
    },

    /// The `ip` element of a send output is not an IPv4/IPv6 literal
    #[error("value of the element 'ip' of the output '{output}' is not a valid IPv4/IPv6 address")]
    InvalidAddress {
        /// Name of the send output
        output: String,
    },

    /// File time window does not fit an unsigned 32-bit value
    #[error("invalid time window {0} of a 'file' output (must fit 32 bits)")]
    InvalidWindowSize(u64),

    /// Unrecognized file compression algorithm
    #[error("unknown compression algorithm '{0}'")]
    UnknownCompression(String),

    /// `path` element of a file output is absent or empty
    #[error("element 'path' of the output '{output}' must be defined")]
    MissingPath {
        /// Name of the file output
        output: String,
    },

    /// Kafka broker list is absent or empty
    #[error("list of brokers of a 'kafka' output must be specified")]
    MissingBrokers,

    /// Kafka topic is absent or empty
    #[error("topic of a 'kafka' output must be specified")]
    MissingTopic,

    /// Kafka partition is neither `unassigned` nor a non-negative integer
    #[error("invalid partition '{0}' of a 'kafka' output")]
    InvalidPartition(String),

    /// Kafka property block with an empty key
    #[error("property key of a 'kafka' output cannot be empty")]
    EmptyPropertyKey,

    /// Malformed dotted version string
    #[error("malformed version string '{0}' (expected 2 to 4 dot-separated numbers)")]
    InvalidVersion(String),

    /// Unrecognized syslog hostname mode
    #[error("unknown syslog hostname mode '{0}'")]
    UnknownHostnameMode(String),

    /// Syslog program identifier with characters outside the printable range
    #[error("invalid syslog identifier of the output '{output}' (printable ASCII only)")]
    InvalidSyslogIdentifier {
        /// Name of the syslog output
        output: String,
    },

    /// Syslog program identifier over the length limit
    #[error("too long syslog identifier of the output '{output}' (48 characters max)")]
    SyslogIdentifierTooLong {
        /// Name of the syslog output
        output: String,
    },

    /// Priority block with facility or severity absent
    #[error("both syslog facility and severity must be set")]
    IncompletePriority,

    /// Syslog facility above 23
    #[error("syslog facility {0} is out of range [0..23]")]
    FacilityOutOfRange(u64),

    /// Syslog severity above 7
    #[error("syslog severity {0} is out of range [0..7]")]
    SeverityOutOfRange(u64),

    /// Transport block carrying more than one tcp/udp sub-block
    #[error("multiple syslog transport types are not allowed")]
    MultipleTransports,

    /// Syslog output without any transport sub-block
    #[error("syslog transport type must be defined")]
    MissingTransport,

    /// The outputs sequence is empty
    #[error("at least one output must be defined")]
    NoOutputs,

    /// More than one print output
    #[error("multiple 'print' outputs are not allowed")]
    MultiplePrintOutputs,

    /// Two outputs (of any kinds) share one name
    #[error("multiple outputs with the same name '{0}'")]
    DuplicateName(String),
}

/// Public error type of the crate.
///
/// Construction of a [`Config`](crate::Config) is a single fallible
/// operation: every inner failure surfaces as exactly one `Parse` diagnostic
/// with the originating message nested inside it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document was read but did not describe a valid configuration
    #[error("failed to parse the configuration: {0}")]
    Parse(#[from] ParseError),

    /// The configuration file could not be read at all
    #[error("failed to read configuration file '{path}': {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },
}

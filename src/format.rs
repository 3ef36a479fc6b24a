//! Record-formatting options
//!
//! A flat set of flags that later stages of the export pipeline consult when
//! rendering flow records. Parsing overwrites individual fields of the
//! defaults below; after construction the whole set is immutable.

/// How TCP flags are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TcpFlagsStyle {
    /// Textual form, e.g. `.A..S.`
    #[default]
    Formatted,
    /// Raw numeric value
    Raw,
}

/// How timestamps are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampStyle {
    /// ISO-style textual form
    #[default]
    Formatted,
    /// Milliseconds since the UNIX epoch
    Unix,
}

/// How transport protocols are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolStyle {
    /// Protocol name, e.g. `TCP`
    #[default]
    Formatted,
    /// Raw protocol number
    Raw,
}

/// Formatting options of the export pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// TCP flags rendering style
    pub tcp_flags: TcpFlagsStyle,

    /// Timestamp rendering style
    pub timestamp: TimestampStyle,

    /// Transport protocol rendering style
    pub protocol: ProtocolStyle,

    /// Skip fields with no known definition
    pub ignore_unknown: bool,

    /// Skip records described by options templates
    pub ignore_options: bool,

    /// Escape non-printable characters in string fields
    pub non_printable: bool,

    /// Identify fields by numeric IDs instead of names
    pub numeric_names: bool,

    /// Render octet arrays as unsigned integers where they fit
    pub octet_array_as_uint: bool,

    /// Emit each direction of a biflow record separately
    pub split_biflow: bool,

    /// Add per-record metadata (ODID, export time, ...)
    pub detailed_info: bool,

    /// Emit template records as well
    pub template_info: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tcp_flags: TcpFlagsStyle::Formatted,
            timestamp: TimestampStyle::Formatted,
            protocol: ProtocolStyle::Formatted,
            ignore_unknown: true,
            ignore_options: true,
            non_printable: true,
            numeric_names: false,
            octet_array_as_uint: true,
            split_biflow: false,
            detailed_info: false,
            template_info: false,
        }
    }
}

//! Constants for the dumpxml document layout

/// Keys whose sequence values are wrapped in a container element.
pub const DEFAULT_ARRAY_FIELDS: [&str; 7] = [
    "external_ids",
    "links",
    "locations",
    "names",
    "relationships",
    "types",
    "domains",
];

/// Key whose sequence value is emitted bare, without a wrapper element.
pub const PASS_THROUGH_FIELD: &str = "all";

/// Root element of a document converted from an array of records.
pub const RECORDS_TAG: &str = "records";

/// Element holding a single record.
pub const RECORD_TAG: &str = "record";

/// Field used to pair JSON records with their XML counterparts.
pub const ID_FIELD: &str = "id";

/// Fields every `record` element must carry for the document to be well formed.
pub const REQUIRED_RECORD_FIELDS: [&str; 6] = ["admin", "id", "locations", "names", "status", "types"];

/// XML version written in the declaration.
pub const XML_VERSION: &str = "1.0";

/// Encoding written in the declaration.
pub const XML_ENCODING: &str = "UTF-8";

/// Spaces per nesting level in pretty-printed output.
pub const DEFAULT_INDENT: usize = 2;

/// Records drawn per validation run unless configured otherwise.
pub const DEFAULT_SAMPLE_COUNT: usize = 10;

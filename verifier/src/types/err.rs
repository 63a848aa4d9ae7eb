/*!
Error types used throughout the library.

Rule checks never panic: a failed rule returns `Ok(false)` (see
[RuleError] for the few cases where a rule *can't even be evaluated*,
e.g. a premise of the wrong kind). Only parsing, resource exhaustion,
and genuinely corrupt state produce an [ErrorKind].
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error while parsing a task file or certificate file.
    Parse(ParseError),

    /// An error from the expression or action-set store.
    Store(StoreError),

    /// An error evaluating a rule premise or dispatching a rule tag.
    Rule(RuleError),

    /// An error internal to a formalism engine.
    Engine(EngineError),

    /// The certificate requested more time or memory than allotted.
    Resource(ResourceError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {e:?}"),
            Self::Store(e) => write!(f, "store error: {e:?}"),
            Self::Rule(e) => write!(f, "rule error: {e:?}"),
            Self::Engine(e) => write!(f, "engine error: {e:?}"),
            Self::Resource(e) => write!(f, "resource error: {e:?}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Errors while parsing a task file or a certificate file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The task file could not be opened.
    NoTaskFile,

    /// The certificate file could not be opened.
    NoCertificateFile,

    /// A malformed token on the given line (1-indexed; 0 if unknown).
    Line(usize),

    /// An index used before it was bound (e.g. as a premise or subexpression).
    UnboundIndex(u32),

    /// A fact or action index out of the bounds of the task.
    IndexOutOfBounds,

    /// A numeric token failed to parse.
    BadInteger,

    /// End of input reached mid-declaration.
    UnexpectedEof,

    /// An unrecognised declaration or variant tag.
    UnknownTag(String),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors from the expression or action-set stores.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// An `add` targeted an index other than the next free slot.
    NonMonotonicIndex { expected: u32, got: u32 },

    /// A compound expression referenced an index that is not strictly earlier.
    ForwardReference,

    /// No expression/action-set/knowledge item exists at the given index.
    NotFound(u32),
}

impl From<StoreError> for ErrorKind {
    fn from(e: StoreError) -> Self {
        ErrorKind::Store(e)
    }
}

/// Errors evaluating or dispatching a rule.
///
/// These do not cause the process to exit; the driver records the
/// failing knowledge index and the certificate is ultimately rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleError {
    /// The rule tag is not one of the fixed set in §4.5/§6.
    UnknownTag(String),

    /// A premise knowledge item was not of the kind the rule requires.
    WrongPremiseKind,

    /// An operand expression did not have the syntactic shape the rule requires.
    WrongShape,

    /// A rule requiring the all-actions constant was given a concrete enumeration.
    NotAllActions,

    /// Two formalisms in a B4 comparison neither support a common bridge.
    NoBridge,

    /// Two BDD operands use incompatible variable orders.
    IncompatibleVariableOrder,
}

impl From<RuleError> for ErrorKind {
    fn from(e: RuleError) -> Self {
        ErrorKind::Rule(e)
    }
}

/// Errors internal to a formalism engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// A BDD dump file was malformed.
    MalformedBddDump,

    /// A BDD variable order did not cover every task fact.
    IncompleteVariableOrder,

    /// An explicit model's bitvector length did not match its declared variable list.
    ModelLengthMismatch,
}

impl From<EngineError> for ErrorKind {
    fn from(e: EngineError) -> Self {
        ErrorKind::Engine(e)
    }
}

/// Resource-exhaustion errors: fatal, with a dedicated process exit code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResourceError {
    /// The wall-clock timeout elapsed.
    Timeout,

    /// The memory cap was exceeded.
    OutOfMemory,
}

impl From<ResourceError> for ErrorKind {
    fn from(e: ResourceError) -> Self {
        ErrorKind::Resource(e)
    }
}

/// Default limit on simultaneously open containers.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration options for the tokenizer.
///
/// # Examples
///
/// ```rust
/// use lazyjson::{LazyArray, ParserOptions};
///
/// let options = ParserOptions {
///     allow_trailing_data: true,
///     ..Default::default()
/// };
/// let array = LazyArray::parse_with("[1, 2] trailing", &options)?;
/// assert_eq!(array.len(), 2);
/// # Ok::<(), lazyjson::LazyError>(())
/// ```
///
/// # Default
///
/// `max_depth` defaults to [`DEFAULT_MAX_DEPTH`]; all flags default to
/// `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of containers that may be open at once.
    ///
    /// The tokenizer keeps its own stack, so deep documents never exhaust
    /// the call stack; this bound caps the memory spent on that stack.
    /// Exceeding it fails with [`ErrorKind::DepthExceeded`].
    ///
    /// [`ErrorKind::DepthExceeded`]: crate::ErrorKind::DepthExceeded
    pub max_depth: usize,

    /// Whether to accept numbers with redundant leading zeros such as `007`
    /// or `-01.5`.
    ///
    /// Strict JSON forbids them.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_zeros: bool,

    /// Whether to ignore anything following the root container.
    ///
    /// When `false`, only whitespace may follow the closing `}` or `]`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_data: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_leading_zeros: false,
            allow_trailing_data: false,
        }
    }
}

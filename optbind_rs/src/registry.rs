//! Option descriptors and the ordered registry that holds them.
//!
//! A descriptor is split in two halves: the [`OptSpec`] (names, kind,
//! description) used for matching and help, and the [`Binding`] that the
//! parsers write into. Keeping them in parallel vectors lets a callback look
//! at the whole option table while the parser holds a mutable borrow of one
//! binding.

use std::fmt;

use crate::error::{Error, Result, fatal};
use crate::report::Usage;
use crate::secret::SecretString;

/// Starting capacity of a fresh registry.
pub const INITIAL_CAPACITY: usize = 10;

/// Callback invoked when its option is matched: receives the usage view and
/// the token (argv) or key (config file) that triggered it.
pub type OptCallback<'a> = Box<dyn FnMut(&Usage<'_>, &str) + 'a>;

// ============================================================================
// Descriptor
// ============================================================================

/// What kind of value an option carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptKind {
    Flag,
    Integer,
    String,
    Secret,
    Callback,
}

impl OptKind {
    /// Whether the option needs a value token after it.
    pub fn takes_value(self) -> bool {
        matches!(self, OptKind::Integer | OptKind::String | OptKind::Secret)
    }
}

/// Where a matched option's value goes.
pub enum Binding<'a> {
    Flag(&'a mut bool),
    Integer(&'a mut i64),
    Text(&'a mut Option<String>),
    Secret(&'a mut Option<SecretString>),
    Callback(OptCallback<'a>),
}

impl Binding<'_> {
    pub fn kind(&self) -> OptKind {
        match self {
            Binding::Flag(_) => OptKind::Flag,
            Binding::Integer(_) => OptKind::Integer,
            Binding::Text(_) => OptKind::String,
            Binding::Secret(_) => OptKind::Secret,
            Binding::Callback(_) => OptKind::Callback,
        }
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binding::{:?}", self.kind())
    }
}

/// Matching and help metadata for one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptSpec {
    pub short: Option<char>,
    pub long: Option<String>,
    pub description: Option<String>,
    pub kind: OptKind,
}

impl OptSpec {
    /// `--name` form, or an empty string when there is no long name.
    pub fn long_flag(&self) -> String {
        self.long
            .as_deref()
            .map(|name| format!("--{name}"))
            .unwrap_or_default()
    }

    fn has_name(&self) -> bool {
        self.short.is_some() || self.long.is_some()
    }
}

/// Descriptor builder handed to [`Registry::add`].
///
/// ```
/// use optbind::Opt;
///
/// let mut verbose = false;
/// let opt = Opt::flag(&mut verbose)
///     .short('v')
///     .long("verbose")
///     .describe("print more");
/// assert_eq!(opt.spec().long.as_deref(), Some("verbose"));
/// ```
#[derive(Debug)]
pub struct Opt<'a> {
    spec: OptSpec,
    binding: Binding<'a>,
}

impl<'a> Opt<'a> {
    pub fn new(binding: Binding<'a>) -> Self {
        Self {
            spec: OptSpec {
                short: None,
                long: None,
                description: None,
                kind: binding.kind(),
            },
            binding,
        }
    }

    pub fn flag(cell: &'a mut bool) -> Self {
        Self::new(Binding::Flag(cell))
    }

    pub fn integer(cell: &'a mut i64) -> Self {
        Self::new(Binding::Integer(cell))
    }

    pub fn text(cell: &'a mut Option<String>) -> Self {
        Self::new(Binding::Text(cell))
    }

    pub fn secret(cell: &'a mut Option<SecretString>) -> Self {
        Self::new(Binding::Secret(cell))
    }

    pub fn callback(callback: impl FnMut(&Usage<'_>, &str) + 'a) -> Self {
        Self::new(Binding::Callback(Box::new(callback)))
    }

    pub fn short(mut self, name: char) -> Self {
        self.spec.short = Some(name);
        self
    }

    /// Set the long name. An empty name means "no long name".
    pub fn long(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.spec.long = (!name.is_empty()).then_some(name);
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.spec.description = Some(text.into());
        self
    }

    pub fn spec(&self) -> &OptSpec {
        &self.spec
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered option table. Insertion order is both lookup priority
/// (first match wins) and help display order.
#[derive(Debug)]
pub struct Registry<'a> {
    pub(crate) specs: Vec<OptSpec>,
    pub(crate) bindings: Vec<Binding<'a>>,
}

impl Default for Registry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        let mut registry = Self {
            specs: Vec::new(),
            bindings: Vec::new(),
        };
        registry.reserve_exact(INITIAL_CAPACITY);
        registry
    }

    /// Append a descriptor. Colliding names are allowed; the earlier one wins.
    pub fn add(&mut self, opt: Opt<'a>) -> Result<()> {
        if !opt.spec.has_name() {
            return Err(Error::Unnamed);
        }
        self.make_room();
        tracing::trace!(
            short = ?opt.spec.short,
            long = ?opt.spec.long,
            kind = ?opt.spec.kind,
            "registered option"
        );
        self.specs.push(opt.spec);
        self.bindings.push(opt.binding);
        Ok(())
    }

    /// Append a short-only descriptor without a description.
    pub fn add_short(&mut self, name: char, binding: Binding<'a>) -> Result<()> {
        self.add(Opt::new(binding).short(name))
    }

    pub fn specs(&self) -> &[OptSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.specs.capacity().min(self.bindings.capacity())
    }

    /// Double the capacity when the table is full.
    fn make_room(&mut self) {
        let capacity = self.capacity();
        if self.len() >= capacity {
            self.reserve_exact(capacity.max(1));
        }
    }

    fn reserve_exact(&mut self, additional: usize) {
        if self.specs.try_reserve_exact(additional).is_err()
            || self.bindings.try_reserve_exact(additional).is_err()
        {
            fatal("option registry allocation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_initial_capacity() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.capacity() >= INITIAL_CAPACITY);
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let mut cells = vec![false; 25];
        let mut registry = Registry::new();
        for (i, cell) in cells.iter_mut().enumerate() {
            registry
                .add(Opt::flag(cell).long(format!("opt{i}")))
                .expect("add option");
        }
        assert_eq!(registry.len(), 25);
        assert!(registry.capacity() >= 25);
        let names: Vec<_> = registry
            .specs()
            .iter()
            .map(|s| s.long.clone().unwrap_or_default())
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("opt0"));
        assert_eq!(names.last().map(String::as_str), Some("opt24"));
    }

    #[test]
    fn test_rejects_unnamed_descriptor() {
        let mut flag = false;
        let mut other = false;
        let mut registry = Registry::new();
        assert!(matches!(
            registry.add(Opt::flag(&mut flag)),
            Err(Error::Unnamed)
        ));
        assert!(matches!(
            registry.add(Opt::flag(&mut other).long("")),
            Err(Error::Unnamed)
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_long_name_is_no_long_name() {
        let mut flag = false;
        let mut registry = Registry::new();
        registry
            .add(Opt::flag(&mut flag).short('x').long(""))
            .expect("short name is enough");
        assert_eq!(registry.specs()[0].long, None);
        assert_eq!(registry.specs()[0].long_flag(), "");
    }

    #[test]
    fn test_kind_follows_binding() {
        let mut n = 0;
        let mut s = None;
        let mut p = None;
        assert_eq!(Opt::integer(&mut n).spec().kind, OptKind::Integer);
        assert_eq!(Opt::text(&mut s).spec().kind, OptKind::String);
        assert_eq!(Opt::secret(&mut p).spec().kind, OptKind::Secret);
        assert_eq!(Opt::callback(|_, _| {}).spec().kind, OptKind::Callback);
        assert!(OptKind::Secret.takes_value());
        assert!(!OptKind::Flag.takes_value());
    }

    #[test]
    fn test_add_short_keeps_duplicates() {
        let mut a = false;
        let mut b = false;
        let mut registry = Registry::new();
        registry
            .add_short('x', Binding::Flag(&mut a))
            .expect("first");
        registry
            .add_short('x', Binding::Flag(&mut b))
            .expect("second");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.specs()[1].short, Some('x'));
        assert_eq!(registry.specs()[1].long, None);
    }
}

/*!
Argument declarations, and the table that collects them.

An [`ArgumentSpec`] describes a single command-line argument: its names, its
policy, and how to reach the field it's bound to. A [`SpecTable`] holds all of
the specs for a destination type, and is usually built by
[`Arguments::spec_table`][crate::Arguments::spec_table], which is in turn
usually derived with `#[derive(Arguments)]`.
*/

use core::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

use crate::{
    errors::{AppendError, ConfigurationError},
    parameter::Placeholder,
    slot::{AcceptError, Slot, ValueKind},
};

/// A set of flags controlling how an argument may be used.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Policy(u8);

impl Policy {
    pub const NONE: Self = Self(0);

    /// The argument must appear at least once
    pub const REQUIRED: Self = Self(1);

    /// Each value (or, for maps, each key) may appear at most once
    pub const UNIQUE: Self = Self(1 << 1);

    /// The argument may appear more than once
    pub const ALLOW_MULTIPLE: Self = Self(1 << 2);

    /// The argument must be the only one on its command line
    pub const EXCLUSIVE: Self = Self(1 << 3);

    const NAMES: [(Self, &'static str); 4] = [
        (Self::REQUIRED, "REQUIRED"),
        (Self::UNIQUE, "UNIQUE"),
        (Self::ALLOW_MULTIPLE, "ALLOW_MULTIPLE"),
        (Self::EXCLUSIVE, "EXCLUSIVE"),
    ];

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for Policy {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Policy {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(
                Self::NAMES
                    .iter()
                    .filter(|&&(flag, _)| self.contains(flag))
                    .map(|&(_, name)| name),
            )
            .finish()
    }
}

/// Marks an argument as obsolete. Using it produces a warning, or an error if
/// the obsolescence is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obsolete {
    pub message: String,
    pub fatal: bool,
}

/// A buffer of values for one argument during a single parse, which can
/// eventually be written into the destination.
pub(crate) trait Buffer<D> {
    fn accept(&mut self, value: Option<&str>, unique: bool) -> Result<(), AcceptError>;
    fn bind(self: Box<Self>, destination: &mut D) -> Result<(), AppendError>;
}

/// The type-erased connection between an argument and its field.
trait Binding<D>: Send + Sync {
    fn kind(&self) -> ValueKind;
    fn placeholder(&self) -> Placeholder;
    fn element_type(&self) -> Option<&'static str>;
    fn buffer(&self) -> Box<dyn Buffer<D>>;
}

struct FieldBinding<D, S> {
    accessor: fn(&mut D) -> &mut S,
}

struct FieldBuffer<D, S: Slot> {
    accessor: fn(&mut D) -> &mut S,
    values: S::Buffer,
}

impl<D: 'static, S: Slot> Binding<D> for FieldBinding<D, S> {
    fn kind(&self) -> ValueKind {
        S::KIND
    }

    fn placeholder(&self) -> Placeholder {
        S::placeholder()
    }

    fn element_type(&self) -> Option<&'static str> {
        S::element_type()
    }

    fn buffer(&self) -> Box<dyn Buffer<D>> {
        Box::new(FieldBuffer {
            accessor: self.accessor,
            values: S::Buffer::default(),
        })
    }
}

impl<D, S: Slot> Buffer<D> for FieldBuffer<D, S> {
    fn accept(&mut self, value: Option<&str>, unique: bool) -> Result<(), AcceptError> {
        S::accept(&mut self.values, value, unique)
    }

    fn bind(self: Box<Self>, destination: &mut D) -> Result<(), AppendError> {
        let this = *self;
        (this.accessor)(destination).bind(this.values)
    }
}

/// The declaration of a single command-line argument, bound to a field of
/// the destination type `D`.
pub struct ArgumentSpec<D> {
    long_name: String,
    short_name: Option<String>,
    description: Option<String>,
    kind: ValueKind,
    policy: Policy,
    is_default: bool,
    obsolete: Option<Obsolete>,
    binding: Box<dyn Binding<D>>,
}

impl<D: 'static> ArgumentSpec<D> {
    /// Start declaring an argument named `long_name`, bound to the field
    /// returned by `accessor`. The slot's type decides the argument's
    /// [`ValueKind`].
    pub fn builder<S: Slot>(
        long_name: impl Into<String>,
        accessor: fn(&mut D) -> &mut S,
    ) -> ArgumentSpecBuilder<D> {
        ArgumentSpecBuilder {
            long_name: long_name.into(),
            short_name: None,
            description: None,
            policy: Policy::NONE,
            is_default: false,
            obsolete: None,
            binding: Box::new(FieldBinding { accessor }),
        }
    }
}

impl<D> ArgumentSpec<D> {
    #[inline]
    #[must_use]
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    #[inline]
    #[must_use]
    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The effective policy, after defaults for multi-valued kinds have been
    /// applied.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.policy.contains(Policy::REQUIRED)
    }

    #[inline]
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.policy.contains(Policy::UNIQUE)
    }

    #[inline]
    #[must_use]
    pub fn allows_multiple(&self) -> bool {
        self.policy.contains(Policy::ALLOW_MULTIPLE)
    }

    #[inline]
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.policy.contains(Policy::EXCLUSIVE)
    }

    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    #[inline]
    #[must_use]
    pub fn obsolete(&self) -> Option<&Obsolete> {
        self.obsolete.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn placeholder(&self) -> Placeholder {
        self.binding.placeholder()
    }

    /// For multi-valued arguments, the name of the element type.
    #[inline]
    #[must_use]
    pub fn element_type(&self) -> Option<&'static str> {
        self.binding.element_type()
    }

    /// True if `option` is this argument's long or short name.
    #[must_use]
    pub fn matches(&self, option: &str) -> bool {
        self.long_name == option || self.short_name.as_deref() == Some(option)
    }

    pub(crate) fn new_buffer(&self) -> Box<dyn Buffer<D>> {
        self.binding.buffer()
    }
}

impl<D> fmt::Debug for ArgumentSpec<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("long_name", &self.long_name)
            .field("short_name", &self.short_name)
            .field("description", &self.description)
            .field("kind", &self.kind)
            .field("policy", &self.policy)
            .field("is_default", &self.is_default)
            .field("obsolete", &self.obsolete)
            .finish_non_exhaustive()
    }
}

/// Builder for an [`ArgumentSpec`]. Created by [`ArgumentSpec::builder`].
pub struct ArgumentSpecBuilder<D> {
    long_name: String,
    short_name: Option<String>,
    description: Option<String>,
    policy: Policy,
    is_default: bool,
    obsolete: Option<Obsolete>,
    binding: Box<dyn Binding<D>>,
}

impl<D> ArgumentSpecBuilder<D> {
    #[must_use]
    pub fn short(self, short_name: impl Into<String>) -> Self {
        Self {
            short_name: Some(short_name.into()),
            ..self
        }
    }

    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    #[must_use]
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy |= policy;
        self
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.policy(Policy::REQUIRED)
    }

    #[must_use]
    pub fn unique(self) -> Self {
        self.policy(Policy::UNIQUE)
    }

    #[must_use]
    pub fn multiple(self) -> Self {
        self.policy(Policy::ALLOW_MULTIPLE)
    }

    #[must_use]
    pub fn exclusive(self) -> Self {
        self.policy(Policy::EXCLUSIVE)
    }

    /// This argument receives the positional parameters.
    #[must_use]
    pub fn default_argument(self) -> Self {
        Self {
            is_default: true,
            ..self
        }
    }

    #[must_use]
    pub fn obsolete(self, message: impl Into<String>) -> Self {
        Self {
            obsolete: Some(Obsolete {
                message: message.into(),
                fatal: false,
            }),
            ..self
        }
    }

    #[must_use]
    pub fn obsolete_fatal(self, message: impl Into<String>) -> Self {
        Self {
            obsolete: Some(Obsolete {
                message: message.into(),
                fatal: true,
            }),
            ..self
        }
    }

    /**
    Validate the declaration and compute its effective policy.

    Multi-valued kinds that declare neither `UNIQUE` nor `ALLOW_MULTIPLE` get
    both, and `UNIQUE` implies `ALLOW_MULTIPLE`. Single-valued kinds may
    declare neither.
    */
    pub fn build(self) -> Result<ArgumentSpec<D>, ConfigurationError> {
        if self.long_name.is_empty() {
            return Err(ConfigurationError::EmptyLongName);
        }

        validate_name(&self.long_name)?;
        if let Some(short_name) = &self.short_name {
            validate_name(short_name)?;
        }

        let kind = self.binding.kind();
        let mut policy = self.policy;

        if kind.is_multi_valued() {
            if !policy.contains(Policy::UNIQUE) && !policy.contains(Policy::ALLOW_MULTIPLE) {
                policy |= Policy::UNIQUE | Policy::ALLOW_MULTIPLE;
            } else if policy.contains(Policy::UNIQUE) {
                policy |= Policy::ALLOW_MULTIPLE;
            }
        } else if policy.contains(Policy::UNIQUE) {
            return Err(ConfigurationError::UniqueWithoutMultiple {
                name: self.long_name,
            });
        } else if policy.contains(Policy::ALLOW_MULTIPLE) {
            return Err(ConfigurationError::MultipleOnSingleValue {
                name: self.long_name,
                kind,
            });
        }

        Ok(ArgumentSpec {
            long_name: self.long_name,
            short_name: self.short_name,
            description: self.description,
            kind,
            policy,
            is_default: self.is_default,
            obsolete: self.obsolete,
            binding: self.binding,
        })
    }
}

/// Check that an argument name can actually be matched on a command line.
pub fn validate_name(name: &str) -> Result<(), ConfigurationError> {
    let reason = if name.is_empty() {
        "is empty"
    } else if name.contains([':', '+', '-']) {
        "contains an option separator (':', '+', or '-')"
    } else if name.contains(char::is_whitespace) {
        "contains whitespace"
    } else if name.contains('"') {
        "contains a quote"
    } else if name.starts_with(['@', '/']) {
        "starts with '@' or '/'"
    } else {
        return Ok(());
    };

    Err(ConfigurationError::InvalidName {
        name: name.to_owned(),
        reason,
    })
}

/**
All of the argument declarations for a destination type: the named arguments
in declaration order, plus at most one default argument that receives the
positional parameters.
*/
pub struct SpecTable<D> {
    named: Vec<ArgumentSpec<D>>,
    default: Option<ArgumentSpec<D>>,
}

impl<D> SpecTable<D> {
    #[must_use]
    pub fn builder() -> SpecTableBuilder<D> {
        SpecTableBuilder {
            table: SpecTable {
                named: Vec::new(),
                default: None,
            },
        }
    }

    /// The named arguments, in declaration order.
    #[inline]
    #[must_use]
    pub fn named(&self) -> &[ArgumentSpec<D>] {
        &self.named
    }

    #[inline]
    #[must_use]
    pub fn default_argument(&self) -> Option<&ArgumentSpec<D>> {
        self.default.as_ref()
    }

    /// Every argument: the named ones in declaration order, then the default.
    pub fn iter(&self) -> impl Iterator<Item = &ArgumentSpec<D>> {
        self.named.iter().chain(&self.default)
    }

    /// Find a named argument by long name, or failing that, by short name.
    #[must_use]
    pub fn find(&self, option: &str) -> Option<&ArgumentSpec<D>> {
        self.position(option).map(|index| &self.named[index])
    }

    pub(crate) fn position(&self, option: &str) -> Option<usize> {
        self.named
            .iter()
            .position(|spec| spec.long_name == option)
            .or_else(|| {
                self.named
                    .iter()
                    .position(|spec| spec.short_name.as_deref() == Some(option))
            })
    }
}

impl<D> fmt::Debug for SpecTable<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecTable")
            .field("named", &self.named)
            .field("default", &self.default)
            .finish()
    }
}

/// Builder for a [`SpecTable`], which rejects conflicting declarations.
pub struct SpecTableBuilder<D> {
    table: SpecTable<D>,
}

impl<D> SpecTableBuilder<D> {
    /// Build and add an argument.
    pub fn argument(
        &mut self,
        spec: ArgumentSpecBuilder<D>,
    ) -> Result<&mut Self, ConfigurationError> {
        self.add(spec.build()?)
    }

    /// Add an already-built argument.
    pub fn add(&mut self, spec: ArgumentSpec<D>) -> Result<&mut Self, ConfigurationError> {
        if self.table.iter().any(|other| other.long_name == spec.long_name) {
            return Err(ConfigurationError::DuplicateLongName {
                name: spec.long_name,
            });
        }

        if let Some(short_name) = &spec.short_name
            && self
                .table
                .iter()
                .any(|other| other.short_name.as_ref() == Some(short_name))
        {
            return Err(ConfigurationError::DuplicateShortName {
                name: short_name.clone(),
            });
        }

        if spec.is_default {
            if let Some(first) = &self.table.default {
                return Err(ConfigurationError::DuplicateDefault {
                    first: first.long_name.clone(),
                    second: spec.long_name,
                });
            }

            self.table.default = Some(spec);
        } else {
            self.table.named.push(spec);
        }

        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> SpecTable<D> {
        self.table
    }
}

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::attributes::CustomAttributes;
use crate::content::Content;
use crate::error::ConfigError;
use crate::hash::new_set;
use crate::inclusion::Inclusion;
use crate::schema::PropertyDescriptor;

// -----------------------------------------------------------------------------
// Shape

/// How a bean is laid out in the document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `{"name": value, ...}`
    #[default]
    Object,
    /// `[value, ...]` in property order. Filtered-out properties leave a null
    /// placeholder so positions stay stable.
    Array,
}

// -----------------------------------------------------------------------------
// Accessors

trait ErasedAccessor: Send + Sync {
    fn get<'a>(&self, bean: &'a dyn Any) -> Option<&'a dyn Content>;
}

struct TypedAccessor<T> {
    fun: fn(&T) -> &dyn Content,
}

impl<T: Any> ErasedAccessor for TypedAccessor<T> {
    #[inline]
    fn get<'a>(&self, bean: &'a dyn Any) -> Option<&'a dyn Content> {
        bean.downcast_ref::<T>().map(self.fun)
    }
}

struct BeanProperty {
    descriptor: PropertyDescriptor,
    accessor: Box<dyn ErasedAccessor>,
}

// -----------------------------------------------------------------------------
// BeanInfo

/// The property table of a bean-like type.
///
/// Properties keep their declaration order, which is also the output order.
/// Each one owns a typed accessor, so a `BeanInfo` is only obtainable through
/// [`BeanInfo::builder`], which rejects properties without accessors.
///
/// # Examples
///
/// ```
/// use vc_filter::schema::{BeanInfo, PropertyDescriptor};
///
/// struct Point { x: i32, y: i32 }
/// vc_filter::impl_bean_content!(Point);
///
/// let info = BeanInfo::builder::<Point>()
///     .property(PropertyDescriptor::new("x"), |p| &p.x)
///     .property(PropertyDescriptor::new("y"), |p| &p.y)
///     .build()
///     .unwrap();
///
/// assert_eq!(info.len(), 2);
/// assert_eq!(info.index_of("y"), Some(1));
///
/// let point = Point { x: 3, y: 4 };
/// let y = info.value(&point, "y").unwrap();
/// assert_eq!(y.downcast_ref::<i32>(), Some(&4));
/// ```
pub struct BeanInfo {
    type_id: TypeId,
    type_name: &'static str,
    properties: Box<[BeanProperty]>,
    filter_id: Option<Cow<'static, str>>,
    inclusion: Option<Inclusion>,
    shape: Shape,
    attributes: CustomAttributes,
}

impl BeanInfo {
    /// Starts describing the bean type `T`.
    #[inline]
    pub fn builder<T: Any>() -> BeanInfoBuilder<T> {
        BeanInfoBuilder::new()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The filter applied to every property of this bean.
    #[inline]
    pub fn filter_id(&self) -> Option<&str> {
        self.filter_id.as_deref()
    }

    /// The policy of properties that declare none.
    #[inline]
    pub fn inclusion(&self) -> Option<Inclusion> {
        self.inclusion
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub fn custom_attributes(&self) -> &CustomAttributes {
        &self.attributes
    }

    /// Returns the number of properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the descriptors in declaration order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &PropertyDescriptor> {
        self.properties.iter().map(|p| &p.descriptor)
    }

    /// Returns the descriptor named `name`, if present.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .map(|p| &p.descriptor)
            .find(|d| d.name() == name)
    }

    /// Returns the descriptor at `index`, if present.
    #[inline]
    pub fn property_at(&self, index: usize) -> Option<&PropertyDescriptor> {
        self.properties.get(index).map(|p| &p.descriptor)
    }

    /// Returns the position of the property named `name`.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.descriptor.name() == name)
    }

    /// Reads the property named `name` from `bean`.
    ///
    /// Returns `None` if there is no such property or `bean` is not of the
    /// described type.
    pub fn value<'a>(&self, bean: &'a dyn Any, name: &str) -> Option<&'a dyn Content> {
        let property = self.properties.iter().find(|p| p.descriptor.name() == name)?;
        property.accessor.get(bean)
    }

    /// Reads every property of `bean` in declaration order.
    pub(crate) fn values<'s, 'a>(
        &'s self,
        bean: &'a dyn Any,
    ) -> impl ExactSizeIterator<Item = Result<(&'s PropertyDescriptor, &'a dyn Content), ConfigError>>
    {
        self.properties.iter().map(move |property| {
            property
                .accessor
                .get(bean)
                .map(|value| (&property.descriptor, value))
                .ok_or(ConfigError::BeanTypeMismatch {
                    bean: self.type_name,
                })
        })
    }
}

impl fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties().collect::<Vec<_>>())
            .field("filter_id", &self.filter_id)
            .field("inclusion", &self.inclusion)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// BeanInfoBuilder

/// Builder of [`BeanInfo`].
///
/// Properties are declared either together with their accessor through
/// [`property`](Self::property), or separately through
/// [`declare`](Self::declare) and [`accessor`](Self::accessor). The pairing
/// is checked by [`build`](Self::build).
pub struct BeanInfoBuilder<T> {
    type_name: &'static str,
    declared: Vec<PropertyDescriptor>,
    accessors: Vec<(Cow<'static, str>, fn(&T) -> &dyn Content)>,
    filter_id: Option<Cow<'static, str>>,
    inclusion: Option<Inclusion>,
    shape: Shape,
    attributes: CustomAttributes,
}

impl<T: Any> BeanInfoBuilder<T> {
    fn new() -> Self {
        Self {
            type_name: core::any::type_name::<T>(),
            declared: Vec::new(),
            accessors: Vec::new(),
            filter_id: None,
            inclusion: None,
            shape: Shape::Object,
            attributes: CustomAttributes::new(),
        }
    }

    /// Overrides the name used in error messages, `type_name::<T>()` by default.
    #[inline]
    pub fn with_type_name(mut self, name: &'static str) -> Self {
        self.type_name = name;
        self
    }

    /// Binds a filter to every property of the bean.
    #[inline]
    pub fn with_filter(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        self.filter_id = Some(id.into());
        self
    }

    /// Sets the policy of properties that declare none.
    #[inline]
    pub fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = Some(inclusion);
        self
    }

    #[inline]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Adds a type-level custom attribute.
    #[inline]
    pub fn with_attribute<A: Any + Send + Sync>(mut self, value: A) -> Self {
        self.attributes.insert(value);
        self
    }

    /// Declares a property together with its accessor.
    pub fn property(mut self, descriptor: PropertyDescriptor, accessor: fn(&T) -> &dyn Content) -> Self {
        let name = Cow::Owned(descriptor.name().to_string());
        self.declared.push(descriptor);
        self.accessors.push((name, accessor));
        self
    }

    /// Declares a property whose accessor is given through
    /// [`accessor`](Self::accessor).
    #[inline]
    pub fn declare(mut self, descriptor: PropertyDescriptor) -> Self {
        self.declared.push(descriptor);
        self
    }

    /// Provides the accessor of a declared property.
    ///
    /// The last accessor given for a name is used.
    #[inline]
    pub fn accessor(
        mut self,
        name: impl Into<Cow<'static, str>>,
        accessor: fn(&T) -> &dyn Content,
    ) -> Self {
        self.accessors.push((name.into(), accessor));
        self
    }

    /// Checks the property table and builds the [`BeanInfo`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateProperty`] if a name is declared twice.
    /// - [`ConfigError::UndeclaredAccessor`] if an accessor names no property.
    /// - [`ConfigError::MissingAccessor`] if a property has no accessor.
    pub fn build(self) -> Result<BeanInfo, ConfigError> {
        let bean = self.type_name;

        {
            let mut names = new_set::<&str>();
            for descriptor in &self.declared {
                if !names.insert(descriptor.name()) {
                    return Err(ConfigError::DuplicateProperty {
                        bean,
                        property: descriptor.name().to_string(),
                    });
                }
            }
            for (name, _) in &self.accessors {
                if !names.contains(&**name) {
                    return Err(ConfigError::UndeclaredAccessor {
                        bean,
                        property: name.to_string(),
                    });
                }
            }
        }

        let mut properties = Vec::with_capacity(self.declared.len());
        for descriptor in self.declared {
            let Some(&(_, fun)) = self
                .accessors
                .iter()
                .rev()
                .find(|(name, _)| *name == descriptor.name())
            else {
                return Err(ConfigError::MissingAccessor {
                    bean,
                    property: descriptor.name().to_string(),
                });
            };
            properties.push(BeanProperty {
                descriptor,
                accessor: Box::new(TypedAccessor::<T> { fun }),
            });
        }

        Ok(BeanInfo {
            type_id: TypeId::of::<T>(),
            type_name: bean,
            properties: properties.into_boxed_slice(),
            filter_id: self.filter_id,
            inclusion: self.inclusion,
            shape: self.shape,
            attributes: self.attributes,
        })
    }
}

// -----------------------------------------------------------------------------
// BeanSchema

/// A bean type that can describe itself.
///
/// Used by [`SchemaRegistry::register`](crate::schema::SchemaRegistry::register).
///
/// # Examples
///
/// ```
/// use vc_filter::ConfigError;
/// use vc_filter::schema::{BeanInfo, BeanSchema, PropertyDescriptor, SchemaRegistry};
///
/// struct User { name: String }
/// vc_filter::impl_bean_content!(User);
///
/// impl BeanSchema for User {
///     fn bean_info() -> Result<BeanInfo, ConfigError> {
///         BeanInfo::builder::<Self>()
///             .property(PropertyDescriptor::new("name"), |u| &u.name)
///             .build()
///     }
/// }
///
/// let mut schema = SchemaRegistry::new();
/// schema.register::<User>().unwrap();
/// assert!(schema.contains_bean::<User>());
/// ```
pub trait BeanSchema: Any {
    fn bean_info() -> Result<BeanInfo, ConfigError>;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::BeanInfo;
    use crate::ConfigError;
    use crate::schema::PropertyDescriptor;

    struct Account {
        id: u64,
        owner: String,
    }

    #[test]
    fn declared_and_accessor_pairs_are_matched() {
        let info = BeanInfo::builder::<Account>()
            .declare(PropertyDescriptor::new("id"))
            .declare(PropertyDescriptor::new("owner"))
            .accessor("owner", |a| &a.owner)
            .accessor("id", |a| &a.id)
            .build()
            .unwrap();

        let account = Account {
            id: 7,
            owner: String::from("ann"),
        };
        let names: alloc::vec::Vec<_> = info.properties().map(|d| d.name()).collect();
        assert_eq!(names, ["id", "owner"]);
        assert_eq!(info.value(&account, "id").and_then(|v| v.downcast_ref::<u64>()), Some(&7));
        assert!(info.value(&1_u8, "id").is_none());
    }

    #[test]
    fn missing_accessor_is_rejected() {
        let err = BeanInfo::builder::<Account>()
            .property(PropertyDescriptor::new("id"), |a| &a.id)
            .declare(PropertyDescriptor::new("owner"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingAccessor { property, .. } if property == "owner"));
    }

    #[test]
    fn undeclared_accessor_is_rejected() {
        let err = BeanInfo::builder::<Account>()
            .property(PropertyDescriptor::new("id"), |a| &a.id)
            .accessor("balance", |a| &a.id)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UndeclaredAccessor { property, .. } if property == "balance"));
    }

    #[test]
    fn duplicate_property_is_rejected() {
        let err = BeanInfo::builder::<Account>()
            .property(PropertyDescriptor::new("id"), |a| &a.id)
            .property(PropertyDescriptor::new("id"), |a| &a.id)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateProperty { .. }));
    }

    #[test]
    fn values_report_type_mismatch() {
        let info = BeanInfo::builder::<Account>()
            .with_type_name("Account")
            .property(PropertyDescriptor::new("id"), |a| &a.id)
            .build()
            .unwrap();
        let first = info.values(&0_i32).next().unwrap();
        assert_eq!(first.err(), Some(ConfigError::BeanTypeMismatch { bean: "Account" }));
    }
}

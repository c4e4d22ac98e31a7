/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Entity schemas: field-to-attribute mappings with key and index metadata.
//!
//! A schema is built once per entity type, resolves every field's converter
//! from the registry at build time (so a missing converter fails loudly and
//! early), and is immutable and freely shareable afterwards — typically
//! behind an `Arc`, reused by every operation on that entity.

use crate::converter::{AttributeConverter, ConverterRegistry, ConvertibleType};
use crate::error::Error;
use shale_types::{AttributeMap, AttributeValue};
use std::collections::HashMap;
use std::fmt;

/// Policy for item attributes that have no schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownAttributes {
    /// Skip attributes the schema does not know about (the default — stores
    /// accumulate bookkeeping attributes over time).
    #[default]
    Ignore,
    /// Fail materialization when an item carries an unmapped attribute.
    Fail,
}

/// Name and key shape of a secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMetadata {
    name: String,
    partition_key: String,
    sort_key: Option<String>,
}

impl IndexMetadata {
    /// Describes a secondary index.
    pub fn new(
        name: impl Into<String>,
        partition_key: impl Into<String>,
        sort_key: Option<String>,
    ) -> Self {
        IndexMetadata {
            name: name.into(),
            partition_key: partition_key.into(),
            sort_key,
        }
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index partition key attribute.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// The index sort key attribute, if any.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }
}

type Getter<T> = Box<dyn Fn(&T) -> AttributeValue + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, &AttributeValue) -> Result<(), Error> + Send + Sync>;

struct AttributeDef<T> {
    name: String,
    get: Getter<T>,
    set: Setter<T>,
}

/// Immutable description of how an entity type maps to item attributes.
pub struct EntitySchema<T> {
    new_item: Box<dyn Fn() -> T + Send + Sync>,
    attributes: Vec<AttributeDef<T>>,
    by_name: HashMap<String, usize>,
    partition_key: String,
    sort_key: Option<String>,
    indexes: HashMap<String, IndexMetadata>,
    unknown_attributes: UnknownAttributes,
}

impl<T> fmt::Debug for EntitySchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchema")
            .field(
                "attributes",
                &self.attributes.iter().map(|a| &a.name).collect::<Vec<_>>(),
            )
            .field("partition_key", &self.partition_key)
            .field("sort_key", &self.sort_key)
            .field("indexes", &self.indexes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> EntitySchema<T> {
    /// Creates a builder backed by `registry`.
    pub fn builder(registry: &ConverterRegistry) -> EntitySchemaBuilder<T> {
        EntitySchemaBuilder {
            registry: registry.clone(),
            new_item: None,
            attributes: Vec::new(),
            by_name: HashMap::new(),
            partition_key: None,
            sort_key: None,
            indexes: HashMap::new(),
            unknown_attributes: UnknownAttributes::default(),
        }
    }

    /// The partition key attribute name.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// The sort key attribute name, if any.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// Looks up a declared secondary index.
    pub fn index(&self, name: &str) -> Option<&IndexMetadata> {
        self.indexes.get(name)
    }

    /// The attribute names, in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|def| def.name.as_str())
    }

    /// Materializes one entity from a raw attribute map.
    ///
    /// A missing primary-key attribute always fails; a missing non-key
    /// attribute leaves the field at its constructed default. Attributes
    /// outside the schema follow the [`UnknownAttributes`] policy.
    pub fn item_from_attributes(&self, attrs: &AttributeMap) -> Result<T, Error> {
        if self.unknown_attributes == UnknownAttributes::Fail {
            for key in attrs.keys() {
                if !self.by_name.contains_key(key) {
                    return Err(Error::schema_mismatch(
                        key.as_str(),
                        "attribute has no schema entry",
                    ));
                }
            }
        }

        let mut item = (self.new_item)();
        for def in &self.attributes {
            match attrs.get(&def.name) {
                Some(value) => (def.set)(&mut item, value)?,
                None if self.is_key_attribute(&def.name) => {
                    return Err(Error::schema_mismatch(
                        def.name.as_str(),
                        "required key attribute is missing",
                    ));
                }
                None => {}
            }
        }
        Ok(item)
    }

    /// Renders an entity to its raw attribute map, in declaration order.
    pub fn attributes_from_item(&self, item: &T) -> AttributeMap {
        self.attributes
            .iter()
            .map(|def| (def.name.clone(), (def.get)(item)))
            .collect()
    }

    fn is_key_attribute(&self, name: &str) -> bool {
        name == self.partition_key || self.sort_key.as_deref() == Some(name)
    }
}

/// Builder for [`EntitySchema`].
pub struct EntitySchemaBuilder<T> {
    registry: ConverterRegistry,
    new_item: Option<Box<dyn Fn() -> T + Send + Sync>>,
    attributes: Vec<AttributeDef<T>>,
    by_name: HashMap<String, usize>,
    partition_key: Option<String>,
    sort_key: Option<String>,
    indexes: HashMap<String, IndexMetadata>,
    unknown_attributes: UnknownAttributes,
}

impl<T> fmt::Debug for EntitySchemaBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchemaBuilder")
            .field("attributes", &self.attributes.len())
            .field("partition_key", &self.partition_key)
            .finish()
    }
}

impl<T> EntitySchemaBuilder<T> {
    /// Sets the factory that produces a default-initialized entity.
    pub fn new_item(mut self, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.new_item = Some(Box::new(factory));
        self
    }

    /// Declares an attribute, resolving its converter immediately.
    ///
    /// Fails with [`Error::NoConverterAvailable`] when the registry cannot
    /// supply a converter for `V`, and with [`Error::InvalidSchema`] on a
    /// duplicate attribute name.
    pub fn attribute<V>(
        mut self,
        name: impl Into<String>,
        get: impl Fn(&T) -> V + Send + Sync + 'static,
        set: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Result<Self, Error>
    where
        V: ConvertibleType,
    {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(Error::InvalidSchema(format!(
                "attribute `{name}` is declared twice"
            )));
        }
        let converter = self.registry.resolve::<V>()?;
        let read_converter = converter.clone();
        self.by_name.insert(name.clone(), self.attributes.len());
        self.attributes.push(AttributeDef {
            name,
            get: Box::new(move |item| converter.to_attribute(&get(item))),
            set: Box::new(move |item, attr| {
                let value = read_converter.from_attribute(attr)?;
                set(item, value);
                Ok(())
            }),
        });
        Ok(self)
    }

    /// Names the partition key attribute.
    pub fn partition_key(mut self, name: impl Into<String>) -> Self {
        self.partition_key = Some(name.into());
        self
    }

    /// Names the sort key attribute.
    pub fn sort_key(mut self, name: impl Into<String>) -> Self {
        self.sort_key = Some(name.into());
        self
    }

    /// Declares a secondary index.
    pub fn index(mut self, index: IndexMetadata) -> Self {
        self.indexes.insert(index.name().to_owned(), index);
        self
    }

    /// Sets the policy for attributes outside the schema.
    pub fn unknown_attributes(mut self, policy: UnknownAttributes) -> Self {
        self.unknown_attributes = policy;
        self
    }

    /// Validates the assembled schema and freezes it.
    pub fn build(self) -> Result<EntitySchema<T>, Error> {
        let new_item = self
            .new_item
            .ok_or_else(|| Error::InvalidSchema("no item factory was provided".into()))?;
        let partition_key = self
            .partition_key
            .ok_or_else(|| Error::InvalidSchema("no partition key was named".into()))?;

        let declared = |name: &str| self.by_name.contains_key(name);
        if !declared(&partition_key) {
            return Err(Error::InvalidSchema(format!(
                "partition key `{partition_key}` is not a declared attribute"
            )));
        }
        if let Some(sort_key) = &self.sort_key {
            if !declared(sort_key) {
                return Err(Error::InvalidSchema(format!(
                    "sort key `{sort_key}` is not a declared attribute"
                )));
            }
        }
        for index in self.indexes.values() {
            if !declared(index.partition_key()) {
                return Err(Error::InvalidSchema(format!(
                    "index `{}` partition key `{}` is not a declared attribute",
                    index.name(),
                    index.partition_key()
                )));
            }
            if let Some(sort_key) = index.sort_key() {
                if !declared(sort_key) {
                    return Err(Error::InvalidSchema(format!(
                        "index `{}` sort key `{sort_key}` is not a declared attribute",
                        index.name()
                    )));
                }
            }
        }

        Ok(EntitySchema {
            new_item,
            attributes: self.attributes,
            by_name: self.by_name,
            partition_key,
            sort_key: self.sort_key,
            indexes: self.indexes,
            unknown_attributes: self.unknown_attributes,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{EntitySchema, IndexMetadata, UnknownAttributes};
    use crate::converter::ConverterRegistry;
    use crate::error::Error;
    use shale_types::{AttributeMap, AttributeValue};

    #[derive(Debug, Default, PartialEq, Clone)]
    struct Order {
        id: String,
        version: i64,
        note: Option<String>,
    }

    fn order_schema(registry: &ConverterRegistry) -> EntitySchema<Order> {
        EntitySchema::builder(registry)
            .new_item(Order::default)
            .attribute("id", |o: &Order| o.id.clone(), |o, v| o.id = v)
            .unwrap()
            .attribute("version", |o: &Order| o.version, |o, v| o.version = v)
            .unwrap()
            .attribute("note", |o: &Order| o.note.clone(), |o, v| o.note = v)
            .unwrap()
            .partition_key("id")
            .sort_key("version")
            .index(IndexMetadata::new("by-note", "note", None))
            .build()
            .unwrap()
    }

    fn raw_order() -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs.insert("id".to_owned(), AttributeValue::S("o-1".to_owned()));
        attrs.insert("version".to_owned(), AttributeValue::N("3".to_owned()));
        attrs.insert("note".to_owned(), AttributeValue::S("gift".to_owned()));
        attrs
    }

    #[test]
    fn items_round_trip_through_the_schema() {
        let registry = ConverterRegistry::default();
        let schema = order_schema(&registry);

        let order = schema.item_from_attributes(&raw_order()).unwrap();
        assert_eq!(
            Order {
                id: "o-1".to_owned(),
                version: 3,
                note: Some("gift".to_owned()),
            },
            order
        );
        assert_eq!(raw_order(), schema.attributes_from_item(&order));
    }

    #[test]
    fn missing_key_attribute_is_a_schema_mismatch() {
        let registry = ConverterRegistry::default();
        let schema = order_schema(&registry);

        let mut attrs = raw_order();
        attrs.shift_remove("id");
        let err = schema.item_from_attributes(&attrs).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn missing_non_key_attribute_keeps_the_default() {
        let registry = ConverterRegistry::default();
        let schema = order_schema(&registry);

        let mut attrs = raw_order();
        attrs.shift_remove("note");
        let order = schema.item_from_attributes(&attrs).unwrap();
        assert_eq!(None, order.note);
    }

    #[test]
    fn unknown_attributes_follow_the_policy() {
        let registry = ConverterRegistry::default();
        let lenient = order_schema(&registry);

        let mut attrs = raw_order();
        attrs.insert("audit".to_owned(), AttributeValue::Bool(true));
        assert!(lenient.item_from_attributes(&attrs).is_ok());

        let strict = EntitySchema::builder(&registry)
            .new_item(Order::default)
            .attribute("id", |o: &Order| o.id.clone(), |o, v| o.id = v)
            .unwrap()
            .partition_key("id")
            .unknown_attributes(UnknownAttributes::Fail)
            .build()
            .unwrap();
        let err = strict.item_from_attributes(&attrs).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn conversion_failures_surface_from_materialization() {
        let registry = ConverterRegistry::default();
        let schema = order_schema(&registry);

        let mut attrs = raw_order();
        attrs.insert("version".to_owned(), AttributeValue::N("not-a-number".into()));
        let err = schema.item_from_attributes(&attrs).unwrap_err();
        assert!(matches!(err, Error::Conversion(_)));
    }

    #[test]
    fn builder_validates_its_metadata() {
        let registry = ConverterRegistry::default();

        let missing_key = EntitySchema::<Order>::builder(&registry)
            .new_item(Order::default)
            .attribute("id", |o: &Order| o.id.clone(), |o, v| o.id = v)
            .unwrap()
            .build();
        assert!(matches!(missing_key, Err(Error::InvalidSchema(_))));

        let unknown_partition = EntitySchema::<Order>::builder(&registry)
            .new_item(Order::default)
            .attribute("id", |o: &Order| o.id.clone(), |o, v| o.id = v)
            .unwrap()
            .partition_key("nope")
            .build();
        assert!(matches!(unknown_partition, Err(Error::InvalidSchema(_))));

        let duplicate = EntitySchema::<Order>::builder(&registry)
            .new_item(Order::default)
            .attribute("id", |o: &Order| o.id.clone(), |o, v| o.id = v)
            .unwrap()
            .attribute("id", |o: &Order| o.id.clone(), |o, v| o.id = v);
        assert!(matches!(duplicate, Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn index_metadata_is_queryable() {
        let registry = ConverterRegistry::default();
        let schema = order_schema(&registry);
        let index = schema.index("by-note").unwrap();
        assert_eq!("by-note", index.name());
        assert_eq!("note", index.partition_key());
        assert_eq!(None, index.sort_key());
        assert!(schema.index("missing").is_none());
    }
}

use std::borrow::Cow;
use std::sync::OnceLock;

use vc_filter::filter::{FilterRegistry, PropertyFilter, SimplePropertyFilter};
use vc_filter::schema::{BeanInfo, MapInfo, PropertyDescriptor, SchemaRegistry};
use vc_filter::ser::{PropertyWriter, Sink};
use vc_filter::{
    ConfigError, Content, ContentRef, Document, Error, Inclusion, LinkedMap, MapContent, Mapper,
};

// -----------------------------------------------------------------------------
// Fixtures

/// A map type carrying its own filter binding.
struct FilteredMap(LinkedMap<i32>);

impl Content for FilteredMap {
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Map(self)
    }
}

impl MapContent for FilteredMap {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn Content)> + '_> {
        MapContent::entries(&self.0)
    }
}

/// A map type whose null values are never written.
struct NoNullsMap(LinkedMap<Option<&'static str>>);

impl Content for NoNullsMap {
    fn content_ref(&self) -> ContentRef<'_> {
        ContentRef::Map(self)
    }
}

impl MapContent for NoNullsMap {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, &dyn Content)> + '_> {
        MapContent::entries(&self.0)
    }
}

struct MapBean {
    values: LinkedMap<i32>,
}

vc_filter::impl_bean_content!(MapBean);

struct StringMapBean {
    values: LinkedMap<Option<String>>,
}

vc_filter::impl_bean_content!(StringMapBean);

struct WrapperMapBean {
    values: LinkedMap<OnceLock<String>>,
}

vc_filter::impl_bean_content!(WrapperMapBean);

struct CustomOffset(i32);

/// Keeps `a` only and adds the declared offset to it.
struct OffsetOnlyA;

impl PropertyFilter for OffsetOnlyA {
    fn serialize_as_field(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        writer: &dyn PropertyWriter,
    ) -> Result<(), Error> {
        if writer.name() != "a" {
            return Ok(());
        }
        let offset = writer.get_attribute::<CustomOffset>().map_or(0, |o| o.0);
        let Some(value) = value.downcast_ref::<i32>() else {
            return Err(Error::filter(writer.name(), "not an i32"));
        };
        sink.write_field_name(writer.name())?;
        sink.write_value(&(value + offset))
    }
}

/// Writes every entry as-is.
struct PassThrough;

impl PropertyFilter for PassThrough {
    fn serialize_as_field(
        &self,
        value: &dyn Content,
        sink: &mut dyn Sink,
        writer: &dyn PropertyWriter,
    ) -> Result<(), Error> {
        writer.serialize_as_field(value, sink)
    }
}

/// Fails on every entry.
struct Failing;

impl PropertyFilter for Failing {
    fn serialize_as_field(
        &self,
        _value: &dyn Content,
        _sink: &mut dyn Sink,
        writer: &dyn PropertyWriter,
    ) -> Result<(), Error> {
        Err(Error::filter(writer.name(), "boom"))
    }
}

fn abc() -> LinkedMap<i32> {
    [("a", 1), ("b", 5), ("c", 9)].into_iter().collect()
}

fn json(doc: &Document<'_>) -> String {
    serde_json::to_string(doc).unwrap()
}

fn map_bean_schema(values: PropertyDescriptor) -> SchemaRegistry {
    let mut schema = SchemaRegistry::new();
    schema.insert_bean(
        BeanInfo::builder::<MapBean>()
            .property(values, |b| &b.values)
            .build()
            .unwrap(),
    );
    schema
}

// -----------------------------------------------------------------------------
// Filters

#[test]
fn type_level_filter_keeps_listed_keys() {
    let mut schema = SchemaRegistry::new();
    schema.register_map::<FilteredMap>(MapInfo::new().with_filter("filterForMaps"));

    let mut filters = FilterRegistry::new();
    filters.register("filterForMaps", SimplePropertyFilter::filter_out_all_except(["b"]));

    let mapper = Mapper::new(schema).with_filters(filters);
    let map = FilteredMap(abc());

    let doc = mapper.writer().document(&map).unwrap();
    assert_eq!(json(&doc), r#"{"b":5}"#);
}

#[test]
fn property_level_filter_keeps_listed_keys() {
    let schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("filterX"));

    let mut filters = FilterRegistry::new();
    filters.register("filterX", SimplePropertyFilter::filter_out_all_except(["b"]));

    let mapper = Mapper::new(schema).with_filters(filters);
    let bean = MapBean { values: abc() };

    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"b":5}}"#);
}

#[test]
fn custom_filter_reads_declared_attributes() {
    let schema = map_bean_schema(
        PropertyDescriptor::new("values")
            .with_filter("filterX")
            .with_attribute(CustomOffset(1)),
    );

    let mut filters = FilterRegistry::new();
    filters.register("filterX", OffsetOnlyA);

    let mapper = Mapper::new(schema).with_filters(filters);
    let bean = MapBean { values: abc() };

    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"a":2}}"#);
}

#[test]
fn property_filter_shadows_type_filter() {
    let mut schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("onlyC"));
    schema.register_map::<LinkedMap<i32>>(MapInfo::new().with_filter("onlyB"));

    let mut filters = FilterRegistry::new();
    filters.register("onlyB", SimplePropertyFilter::filter_out_all_except(["b"]));
    filters.register("onlyC", SimplePropertyFilter::filter_out_all_except(["c"]));

    let mapper = Mapper::new(schema).with_filters(filters);

    let bean = MapBean { values: abc() };
    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"c":9}}"#);

    // The same map type outside the property uses its own binding.
    let plain = abc();
    let doc = mapper.writer().document(&plain).unwrap();
    assert_eq!(json(&doc), r#"{"b":5}"#);
}

#[test]
fn fully_filtered_map_is_still_written() {
    let schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("none"));

    let mut filters = FilterRegistry::new();
    filters.register("none", SimplePropertyFilter::filter_out_all_except(["zzz"]));

    let mapper = Mapper::new(schema).with_filters(filters);
    let bean = MapBean { values: abc() };

    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{}}"#);
}

#[test]
fn writer_specific_filters_replace_the_mapper_ones() {
    let schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("filterX"));

    let mut filters = FilterRegistry::new();
    filters.register("filterX", SimplePropertyFilter::filter_out_all_except(["b"]));
    let mapper = Mapper::new(schema).with_filters(filters);

    let mut other = FilterRegistry::new();
    other.register("filterX", SimplePropertyFilter::serialize_all_except(["b"]));

    let bean = MapBean { values: abc() };
    let doc = mapper.writer_with_filters(&other).document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"a":1,"c":9}}"#);
}

// -----------------------------------------------------------------------------
// Inclusion

#[test]
fn type_level_non_null_content() {
    let mut schema = SchemaRegistry::new();
    schema.register_map::<NoNullsMap>(MapInfo::new().with_content_inclusion(Inclusion::NonNull));
    let mapper = Mapper::new(schema);

    let map = NoNullsMap(
        [("a", Some("foo")), ("b", None), ("c", Some("bar"))]
            .into_iter()
            .collect(),
    );

    let doc = mapper.writer().document(&map).unwrap();
    assert_eq!(json(&doc), r#"{"a":"foo","c":"bar"}"#);
}

#[test]
fn property_level_non_null_content() {
    let mut schema = SchemaRegistry::new();
    schema.insert_bean(
        BeanInfo::builder::<StringMapBean>()
            .property(
                PropertyDescriptor::new("values").with_content_inclusion(Inclusion::NonNull),
                |b| &b.values,
            )
            .build()
            .unwrap(),
    );
    let mapper = Mapper::new(schema);

    let bean = StringMapBean {
        values: LinkedMap::new()
            .with("a", Some("foo".to_owned()))
            .with("b", None)
            .with("c", Some("bar".to_owned())),
    };

    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"a":"foo","c":"bar"}}"#);
}

#[test]
fn non_empty_content_drops_null_and_blank() {
    let mut schema = SchemaRegistry::new();
    schema.register_map::<LinkedMap<Option<String>>>(
        MapInfo::new().with_content_inclusion(Inclusion::NonEmpty),
    );
    let mapper = Mapper::new(schema);

    let map = LinkedMap::new()
        .with("a", Some("foo".to_owned()))
        .with("b", Some("bar".to_owned()))
        .with("c", Some(String::new()))
        .with("d", None);

    let doc = mapper.writer().document(&map).unwrap();
    assert_eq!(json(&doc), r#"{"a":"foo","b":"bar"}"#);
}

#[test]
fn container_inclusion_applies_without_content_inclusion() {
    let mut schema = SchemaRegistry::new();
    schema.register_map::<LinkedMap<Option<String>>>(MapInfo::new().with_inclusion(Inclusion::NonEmpty));
    let mapper = Mapper::new(schema);

    let map = LinkedMap::new()
        .with("a", Some(String::new()))
        .with("b", Some("x".to_owned()));

    let doc = mapper.writer().document(&map).unwrap();
    assert_eq!(json(&doc), r#"{"b":"x"}"#);
}

#[test]
fn non_absent_content_drops_empty_wrappers() {
    let mut schema = SchemaRegistry::new();
    schema.insert_bean(
        BeanInfo::builder::<WrapperMapBean>()
            .property(
                PropertyDescriptor::new("values").with_content_inclusion(Inclusion::NonAbsent),
                |b| &b.values,
            )
            .build()
            .unwrap(),
    );
    let mapper = Mapper::new(schema);

    let bean = WrapperMapBean {
        values: LinkedMap::new()
            .with("a", OnceLock::from("foo".to_owned()))
            .with("b", OnceLock::new()),
    };
    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"a":"foo"}}"#);

    // A wrapper around "" is present.
    let bean = WrapperMapBean {
        values: LinkedMap::new().with("c", OnceLock::from(String::new())),
    };
    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"c":""}}"#);
}

#[test]
fn filter_honours_content_inclusion() {
    let mut schema = SchemaRegistry::new();
    schema.insert_bean(
        BeanInfo::builder::<StringMapBean>()
            .property(
                PropertyDescriptor::new("values")
                    .with_filter("notC")
                    .with_content_inclusion(Inclusion::NonNull),
                |b| &b.values,
            )
            .build()
            .unwrap(),
    );
    let mut filters = FilterRegistry::new();
    filters.register("notC", SimplePropertyFilter::serialize_all_except(["c"]));
    let mapper = Mapper::new(schema).with_filters(filters);

    let bean = StringMapBean {
        values: LinkedMap::new()
            .with("a", None)
            .with("b", Some("x".to_owned()))
            .with("c", Some("y".to_owned())),
    };
    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"b":"x"}}"#);
}

#[test]
fn bound_filter_replaces_inclusion_policy() {
    let mut schema = SchemaRegistry::new();
    schema.register_map::<LinkedMap<Option<i32>>>(
        MapInfo::new()
            .with_filter("passThrough")
            .with_content_inclusion(Inclusion::NonNull),
    );
    let mut filters = FilterRegistry::new();
    filters.register("passThrough", PassThrough);
    let mapper = Mapper::new(schema).with_filters(filters);

    let map: LinkedMap<Option<i32>> = [("a", None), ("b", Some(1))].into_iter().collect();
    let doc = mapper.writer().document(&map).unwrap();
    assert_eq!(json(&doc), r#"{"a":null,"b":1}"#);
}

// -----------------------------------------------------------------------------
// Output

#[test]
fn insertion_order_is_kept() {
    let mapper = Mapper::new(SchemaRegistry::new());
    let map = LinkedMap::new().with("c", 1).with("a", 2).with("b", 3);

    let doc = mapper.writer().document(&map).unwrap();
    assert_eq!(json(&doc), r#"{"c":1,"a":2,"b":3}"#);
}

#[test]
fn serialization_is_idempotent() {
    let schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("filterX"));
    let mut filters = FilterRegistry::new();
    filters.register("filterX", SimplePropertyFilter::serialize_all_except(["a"]));
    let mapper = Mapper::new(schema).with_filters(filters);

    let bean = MapBean { values: abc() };
    let doc = mapper.writer().document(&bean).unwrap();
    let first = json(&doc);
    assert_eq!(first, json(&doc));

    let again = mapper.writer().document(&bean).unwrap();
    assert_eq!(first, json(&again));
}

#[test]
fn output_format_is_pluggable() {
    let mut schema = SchemaRegistry::new();
    schema.register_map::<FilteredMap>(MapInfo::new().with_filter("filterForMaps"));
    let mut filters = FilterRegistry::new();
    filters.register("filterForMaps", SimplePropertyFilter::filter_out_all_except(["b"]));
    let mapper = Mapper::new(schema).with_filters(filters);

    let map = FilteredMap(abc());
    let doc = mapper.writer().document(&map).unwrap();
    assert_eq!(ron::to_string(&doc).unwrap(), r#"{"b":5}"#);
}

#[test]
fn object_writer_serializes_directly() {
    let mapper = Mapper::new(SchemaRegistry::new());
    let map = abc();

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::new(&mut out);
    mapper.writer().serialize(&map, &mut serializer).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), r#"{"a":1,"b":5,"c":9}"#);
}

// -----------------------------------------------------------------------------
// Errors

#[test]
fn unknown_filter_fails_before_output() {
    let schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("nope"));
    let mapper = Mapper::new(schema);

    let bean = MapBean { values: abc() };
    let err = mapper.writer().document(&bean).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::UnknownFilter { ref id }) if id == "nope"
    ));

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::new(&mut out);
    assert!(mapper.writer().serialize(&bean, &mut serializer).is_err());
    assert!(out.is_empty());
}

#[test]
fn unknown_filter_can_fall_back_to_serialize_all() {
    let schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("nope"));
    let mapper = Mapper::new(schema).with_filters(FilterRegistry::new().fail_on_unknown_id(false));

    let bean = MapBean { values: abc() };
    let doc = mapper.writer().document(&bean).unwrap();
    assert_eq!(json(&doc), r#"{"values":{"a":1,"b":5,"c":9}}"#);
}

#[test]
fn filter_error_aborts_the_document() {
    let schema = map_bean_schema(PropertyDescriptor::new("values").with_filter("failing"));
    let mut filters = FilterRegistry::new();
    filters.register("failing", Failing);
    let mapper = Mapper::new(schema).with_filters(filters);

    let bean = MapBean { values: abc() };
    let doc = mapper.writer().document(&bean).unwrap();
    let err = serde_json::to_string(&doc).unwrap_err().to_string();

    assert!(err.contains("boom"), "{err}");
    assert!(err.contains("filter failed on property `a`"), "{err}");
    if cfg!(all(debug_assertions, feature = "debug")) {
        assert!(err.contains("values.a"), "{err}");
    }
}

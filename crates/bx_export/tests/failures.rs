//! Accessors, interceptors and failure tolerance.

use core::any::Any;
use std::io;

use bx_export::derive::Export;
use bx_export::info::PropertyKind;
use bx_export::{
    Bean, ByDepth, DefaultInterceptor, ExportConfig, ExportError, ExportInterceptor, Intercepted,
    JsonDataWriter, ModelRegistry, Property, export_accessors, export_to_string,
};

fn export(bean: &dyn Bean, config: &ExportConfig) -> Result<String, ExportError> {
    export_to_string(bean, &ByDepth::new(0), config)
}

fn tolerant() -> ExportConfig {
    ExportConfig::builder().with_skip_if_fail(true).build()
}

// -----------------------------------------------------------------------------
// Beans

#[derive(Export)]
#[export(bean, accessors)]
struct Counter {
    /// Display name.
    #[export]
    name: String,
    hits: Vec<u32>,
}

#[export_accessors]
impl Counter {
    #[export]
    fn total(&self) -> u32 {
        self.hits.iter().sum()
    }

    #[export(name = "first", visibility = 2)]
    fn first_hit(&self) -> Option<u32> {
        self.hits.first().copied()
    }

    #[export]
    fn nth(&self, index: usize) -> u32 {
        self.hits[index]
    }

    fn unexported(&self) -> usize {
        self.hits.len()
    }
}

/// A field and an accessor with overlapping names.
#[derive(Export)]
#[export(bean, accessors)]
struct Meter {
    #[export]
    acc_total: u32,
    samples: Vec<u32>,
}

#[export_accessors]
impl Meter {
    #[export]
    fn total(&self) -> u32 {
        self.samples.iter().sum()
    }
}

#[derive(Export)]
#[export(bean, accessors)]
struct Probe {
    #[export]
    id: u32,
    healthy: bool,
}

#[export_accessors]
impl Probe {
    #[export(fallible)]
    fn status(&self) -> Result<&'static str, io::Error> {
        if self.healthy {
            Ok("up")
        } else {
            Err(io::Error::other("probe offline"))
        }
    }
}

#[derive(Export)]
#[export(bean)]
struct Fleet {
    #[export]
    probes: Vec<Probe>,
}

/// Not marked as a bean.
#[derive(Export)]
struct Secret {
    #[export]
    code: u32,
}

#[derive(Export)]
#[export(bean)]
struct Vault {
    #[export]
    label: &'static str,
    #[export]
    secret: Secret,
}

#[derive(Export)]
#[export(bean)]
struct Archive {
    #[export]
    secrets: Vec<Secret>,
}

#[derive(Export)]
#[export(bean)]
struct Account {
    #[export]
    user: &'static str,
    #[export]
    password: &'static str,
}

fn probe(id: u32, healthy: bool) -> Probe {
    Probe { id, healthy }
}

// -----------------------------------------------------------------------------
// Accessors

#[test]
fn accessors_become_properties() {
    let counter = Counter {
        name: "c".into(),
        hits: vec![2, 3],
    };
    assert_eq!(counter.unexported(), 2);
    assert_eq!(counter.nth(1), 3);

    assert_eq!(
        export(&counter, &ExportConfig::default()).unwrap(),
        r#"{"first":2,"name":"c","total":5}"#
    );
    assert_eq!(
        export_to_string(&counter, &ByDepth::new(2), &ExportConfig::default()).unwrap(),
        r#"{"first":2}"#
    );
}

#[test]
fn field_and_accessor_getters_do_not_clash() {
    let meter = Meter {
        acc_total: 1,
        samples: vec![2, 3],
    };
    assert_eq!(
        export(&meter, &ExportConfig::default()).unwrap(),
        r#"{"acc_total":1,"total":5}"#
    );
}

#[test]
fn accessors_requiring_arguments_are_rejected() {
    let model = ModelRegistry::new().get_for::<Counter>().unwrap();

    let rejected = model.info().rejected_accessors();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].name(), "nth");
    assert_eq!(rejected[0].arity(), 1);

    assert!(model.property("nth").is_none());
    assert!(model.property("unexported").is_none());
    assert!(matches!(model.property("total").unwrap().kind(), PropertyKind::Accessor));
    assert!(matches!(
        model.property("name").unwrap().kind(),
        PropertyKind::Field { .. }
    ));
    assert_eq!(model.property("name").unwrap().docs(), Some("Display name."));
    assert_eq!(model.property("first").unwrap().info().member(), "first_hit");
}

// -----------------------------------------------------------------------------
// Retrieval failures

#[test]
fn failing_property_aborts_by_default() {
    let err = export(&probe(1, false), &ExportConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "Failed to write status");
    match err {
        ExportError::PropertyRetrieval {
            owner,
            property,
            source,
        } => {
            assert!(owner.ends_with("Probe"));
            assert_eq!(property, "status");
            assert_eq!(source.to_string(), "probe offline");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_property_becomes_null_when_tolerant() {
    assert_eq!(
        export(&probe(1, false), &tolerant()).unwrap(),
        r#"{"id":1,"status":null}"#
    );
}

#[test]
fn failing_sequence_elements_are_dropped_whole() {
    let fleet = Fleet {
        probes: vec![probe(1, true), probe(2, false), probe(3, true)],
    };
    assert_eq!(
        export(&fleet, &ExportConfig::default()).unwrap(),
        r#"{"probes":[{"id":1,"status":"up"},{"id":3,"status":"up"}]}"#
    );

    let config = ExportConfig::builder().with_pretty_print(true).build();
    let pretty = export(&fleet, &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(value["probes"].as_array().unwrap().len(), 2);
}

// -----------------------------------------------------------------------------
// Non-exportable types

#[test]
fn unmarked_nested_type_names_the_referencing_property() {
    let vault = Vault {
        label: "v",
        secret: Secret { code: 7 },
    };
    let err = match export(&vault, &ExportConfig::default()) {
        Err(ExportError::NotExportable(err)) => err,
        other => panic!("unexpected result: {other:?}"),
    };
    assert!(err.type_path().ends_with("Secret"));
    let reference = err.referenced_by().unwrap();
    assert!(reference.owner.ends_with("Vault"));
    assert_eq!(reference.property, "secret");

    assert_eq!(
        export(&vault, &tolerant()).unwrap(),
        r#"{"label":"v","secret":{}}"#
    );
}

#[test]
fn unmarked_elements_are_written_empty() {
    let archive = Archive {
        secrets: vec![Secret { code: 1 }, Secret { code: 2 }],
    };
    assert_eq!(
        export(&archive, &ExportConfig::default()).unwrap(),
        r#"{"secrets":[{},{}]}"#
    );
}

#[test]
fn unmarked_root_is_rejected() {
    let err = ModelRegistry::new().get_for::<Secret>().unwrap_err();
    assert_eq!(err.referenced_by(), None);
    assert!(matches!(
        export(&Secret { code: 1 }, &ExportConfig::default()),
        Err(ExportError::NotExportable(_))
    ));
}

#[test]
fn model_refuses_other_types() {
    let registry = ModelRegistry::new();
    let model = registry.get_for::<Account>().unwrap();
    let mut writer = JsonDataWriter::new(Vec::new(), &ExportConfig::default());
    let err = model
        .write_to(&probe(1, true), &ByDepth::new(0), &mut writer)
        .unwrap_err();
    assert!(matches!(err, ExportError::BeanMismatch { .. }));
}

// -----------------------------------------------------------------------------
// Interceptors

struct HidePasswords;

impl ExportInterceptor for HidePasswords {
    fn get_value<'a>(
        &self,
        property: &Property,
        bean: &'a dyn Any,
        config: &ExportConfig,
    ) -> Result<Intercepted<'a>, ExportError> {
        if property.name() == "password" {
            return Ok(Intercepted::Skip);
        }
        DefaultInterceptor.get_value(property, bean, config)
    }
}

#[test]
fn interceptor_can_skip_properties() {
    let account = Account {
        user: "root",
        password: "hunter2",
    };
    let config = ExportConfig::builder()
        .with_interceptor(HidePasswords)
        .build();
    assert_eq!(export(&account, &config).unwrap(), r#"{"user":"root"}"#);
    assert_eq!(
        export(&account, &ExportConfig::default()).unwrap(),
        r#"{"password":"hunter2","user":"root"}"#
    );
}

//! Output of each flavor, class attributes and escaping.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, SystemTime};

use bx_export::derive::Export;
use bx_export::{
    Bean, ByDepth, ClassAttribute, Export, ExportConfig, ExportKind, Flavor, JsonDataWriter,
    ModelRegistry, export_to_string,
};

fn export(bean: &dyn Bean, config: &ExportConfig) -> String {
    export_to_string(bean, &ByDepth::new(0), config).unwrap()
}

fn flavored(flavor: Flavor) -> ExportConfig {
    ExportConfig::builder().with_flavor(flavor).build()
}

// -----------------------------------------------------------------------------
// Beans

#[derive(Export)]
#[export(bean)]
struct Point {
    #[export]
    x: i32,
    #[export]
    y: String,
}

#[derive(Export)]
enum Color {
    Blue,
    #[export(name = "red_anime")]
    RedAnime,
}

#[derive(Export)]
#[export(bean)]
struct Job {
    #[export]
    name: &'static str,
    #[export]
    color: Color,
    #[export]
    last_build: Option<u32>,
}

#[derive(Export)]
#[export(bean)]
struct Hudson {
    #[export]
    jobs: Vec<Job>,
    #[export(name = "nodeName")]
    node_name: &'static str,
}

trait Shape: Bean {}

#[derive(Export)]
#[export(bean)]
struct Square {
    #[export]
    side: u32,
}

impl Shape for Square {}

#[derive(Export)]
#[export(bean)]
struct Drawing {
    #[export]
    shapes: Vec<Box<dyn Shape>>,
    #[export]
    main: Square,
}

#[derive(Export)]
#[export(bean)]
struct Env {
    #[export(verbose_map = "name/value")]
    vars: BTreeMap<String, u32>,
    #[export]
    flags: BTreeMap<&'static str, bool>,
}

#[derive(Export)]
#[export(custom = as_text)]
struct Version(u32, u32);

impl Version {
    fn as_text(&self) -> String {
        format!("{}.{}", self.0, self.1)
    }
}

#[derive(Export)]
#[export(bean)]
struct Pair(#[export(name = "left")] u8, #[export(name = "right")] u8);

#[derive(Export)]
#[export(bean)]
struct Page<T> {
    #[export]
    items: Vec<T>,
    #[export]
    total: usize,
}

#[derive(Export)]
#[export(bean)]
struct Release {
    #[export]
    version: Version,
    #[export]
    published: SystemTime,
    #[export]
    ratio: f64,
}

#[derive(Export)]
#[export(bean)]
struct Team {
    #[export]
    a: Rc<Point>,
    #[export]
    b: Rc<Point>,
}

fn point() -> Point {
    Point {
        x: 1,
        y: "a".into(),
    }
}

fn hudson() -> Hudson {
    Hudson {
        jobs: vec![
            Job {
                name: "build",
                color: Color::Blue,
                last_build: Some(7),
            },
            Job {
                name: "deploy",
                color: Color::RedAnime,
                last_build: None,
            },
        ],
        node_name: "master",
    }
}

// -----------------------------------------------------------------------------
// JSON-shaped flavors

#[test]
fn json_of_nested_sequences() {
    assert_eq!(
        export(&hudson(), &ExportConfig::default()),
        r#"{"jobs":[{"color":"Blue","last_build":7,"name":"build"},{"color":"red_anime","last_build":null,"name":"deploy"}],"nodeName":"master"}"#
    );
}

#[test]
fn enum_variants_export_their_names() {
    fn name(color: &Color) -> String {
        match color.export_kind() {
            ExportKind::Enum(name) => name.into_owned(),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(name(&Color::Blue), "Blue");
    assert_eq!(name(&Color::RedAnime), "red_anime");
}

#[test]
fn json_reparses_to_the_same_structure() {
    let text = export(&hudson(), &ExportConfig::default());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "jobs": [
                { "color": "Blue", "last_build": 7, "name": "build" },
                { "color": "red_anime", "last_build": null, "name": "deploy" },
            ],
            "nodeName": "master",
        })
    );
}

#[test]
fn pretty_printed_json() {
    let config = ExportConfig::builder().with_pretty_print(true).build();
    assert_eq!(
        export(&point(), &config),
        "{\n  \"x\" : 1,\n  \"y\" : \"a\"\n}"
    );
}

#[test]
fn python_and_ruby_literals() {
    let job = Job {
        name: "n",
        color: Color::Blue,
        last_build: None,
    };
    assert_eq!(
        export(&job, &flavored(Flavor::Python)),
        r#"{"color":"Blue","last_build":None,"name":"n"}"#
    );
    assert_eq!(
        export(&job, &flavored(Flavor::Ruby)),
        r#"OpenStruct.new({"color" => "Blue","last_build" => nil,"name" => "n"})"#
    );
}

#[test]
fn jsonp_wraps_in_callback() {
    let config = ExportConfig::builder()
        .with_flavor(Flavor::Jsonp)
        .with_callback("render")
        .build();
    assert_eq!(export(&point(), &config), r#"render({"x":1,"y":"a"})"#);

    // The callback only applies to JSONP.
    let config = ExportConfig::builder().with_callback("render").build();
    assert_eq!(export(&point(), &config), r#"{"x":1,"y":"a"}"#);
}

#[test]
fn strings_are_escaped() {
    let point = Point {
        x: -3,
        y: "say \"hi\"\n\u{1F600}".into(),
    };
    assert_eq!(
        export(&point, &ExportConfig::default()),
        r#"{"x":-3,"y":"say \"hi\"\u000a\ud83d\ude00"}"#
    );
}

#[test]
fn maps_compact_and_verbose() {
    let env = Env {
        vars: BTreeMap::from([("PATH".to_owned(), 1), ("HOME".to_owned(), 2)]),
        flags: BTreeMap::from([("debug", true)]),
    };
    assert_eq!(
        export(&env, &ExportConfig::default()),
        r#"{"flags":{"debug":true},"vars":[{"name":"HOME","value":2},{"name":"PATH","value":1}]}"#
    );
}

#[test]
fn custom_dates_floats_and_tuple_beans() {
    let release = Release {
        version: Version(1, 2),
        published: SystemTime::UNIX_EPOCH + Duration::from_millis(1500),
        ratio: 1.0,
    };
    assert_eq!(
        export(&release, &ExportConfig::default()),
        r#"{"published":1500,"ratio":1.0,"version":"1.2"}"#
    );
    assert_eq!(
        export(&Pair(1, 2), &ExportConfig::default()),
        r#"{"left":1,"right":2}"#
    );
}

#[test]
fn generic_beans_are_described_per_instantiation() {
    let numbers = Page {
        items: vec![1_u8, 2],
        total: 2,
    };
    let words = Page {
        items: vec!["a".to_owned()],
        total: 1,
    };
    assert_eq!(
        export(&numbers, &ExportConfig::default()),
        r#"{"items":[1,2],"total":2}"#
    );
    assert_eq!(
        export(&words, &ExportConfig::default()),
        r#"{"items":["a"],"total":1}"#
    );
    assert!(numbers.bean_info().is::<Page<u8>>());
    assert!(words.bean_info().is::<Page<String>>());
    assert_eq!(words.bean_info().type_name(), "Page");
}

#[test]
fn shared_values_are_written_at_each_reference() {
    let shared = Rc::new(point());
    let team = Team {
        a: Rc::clone(&shared),
        b: shared,
    };
    assert_eq!(
        export(&team, &ExportConfig::default()),
        r#"{"a":{"x":1,"y":"a"},"b":{"x":1,"y":"a"}}"#
    );
}

// -----------------------------------------------------------------------------
// Class attribute

#[test]
fn class_attribute_if_needed_marks_root_and_trait_objects() {
    let drawing = Drawing {
        shapes: vec![Box::new(Square { side: 2 })],
        main: Square { side: 1 },
    };
    let config = ExportConfig::builder()
        .with_class_attribute(ClassAttribute::IF_NEEDED.simple())
        .build();
    assert_eq!(
        export(&drawing, &config),
        r#"{"_class":"Drawing","main":{"side":1},"shapes":[{"_class":"Square","side":2}]}"#
    );
}

#[test]
fn class_attribute_always_with_type_path() {
    let config = ExportConfig::builder()
        .with_class_attribute(ClassAttribute::ALWAYS)
        .build();
    let text = export(&point(), &config);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["_class"], core::any::type_name::<Point>());
    assert_eq!(value["x"], 1);
}

#[test]
fn legacy_class_field() {
    let config = ExportConfig::builder().with_class_field(true).build();
    assert_eq!(
        export(&point(), &config),
        r#"{"class":"Point","x":1,"y":"a"}"#
    );
}

// -----------------------------------------------------------------------------
// XML

#[test]
fn xml_elements_and_singular_array_items() {
    assert_eq!(
        export(&hudson(), &flavored(Flavor::Xml)),
        "<hudson><job><color>Blue</color><last_build>7</last_build><name>build</name></job>\
         <job><color>red_anime</color><name>deploy</name></job><nodeName>master</nodeName></hudson>"
    );
}

#[test]
fn xml_class_attribute_and_escaping() {
    let point = Point {
        x: 1,
        y: "<a & b>".into(),
    };
    let config = ExportConfig::builder()
        .with_flavor(Flavor::Xml)
        .with_class_attribute(ClassAttribute::ALWAYS.simple())
        .build();
    assert_eq!(
        export(&point, &config),
        "<point _class='Point'><x>1</x><y>&lt;a &amp; b&gt;</y></point>"
    );
}

// -----------------------------------------------------------------------------
// Writing through a model

#[test]
fn model_writes_into_a_caller_supplied_writer() {
    let registry = ModelRegistry::new();
    let model = registry.get_for::<Point>().unwrap();
    let config = ExportConfig::default();

    let mut writer = JsonDataWriter::new(Vec::new(), &config);
    model.write_to_depth(&point(), 0, &mut writer).unwrap();
    assert_eq!(writer.into_inner(), br#"{"x":1,"y":"a"}"#);

    assert_eq!(Flavor::from_name("XML"), Some(Flavor::Xml));
    assert_eq!("ruby".parse::<Flavor>().unwrap(), Flavor::Ruby);
    assert!("yaml".parse::<Flavor>().is_err());
}

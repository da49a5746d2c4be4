//! Deferred rendering and location resolution

use elemental::{Builder, Config, Location, RenderError, RootElement, Specification};
use elemental_dom::{Document, Listener};

fn body_tags(doc: &Document) -> Vec<String> {
    let body = doc.body().unwrap();
    doc.element_children(body)
        .into_iter()
        .map(|n| doc.element(n).unwrap().classes.value())
        .collect()
}

#[test]
fn test_builds_before_ready_render_in_call_order() {
    let mut doc = Document::new();
    let builder = Builder::new(&mut doc);

    let first = builder.build(&mut doc, ".first");
    let second = builder.build(&mut doc, ".second");
    assert!(!builder.is_ready());
    assert_eq!(builder.pending(), 2);
    assert!(first.root().is_none());
    assert!(body_tags(&doc).is_empty());

    doc.finish_loading();
    assert!(builder.is_ready());
    assert_eq!(builder.pending(), 0);
    assert_eq!(body_tags(&doc), vec!["first", "second"]);
    assert!(first.is_rendered() && second.is_rendered());

    let third = builder.build(&mut doc, ".third");
    assert_eq!(builder.pending(), 0);
    assert!(third.is_rendered());
    assert_eq!(body_tags(&doc), vec!["first", "second", "third"]);
}

#[test]
fn test_queued_build_can_target_earlier_output() {
    let mut doc = Document::new();
    let builder = Builder::new(&mut doc);

    let spec: Specification = Specification::new(".a.b.c[data-id=monkey]#silly").children([
        Specification::new(".cat.dog.bird").children([".one One", ".two Two", ".three Three"]),
    ]);
    builder.build(&mut doc, spec);
    let pig = builder.build_at(&mut doc, "pig.horse", ".two");

    doc.finish_loading();

    let pig_node = pig.root().unwrap();
    let two = doc.query_selector(".two").unwrap();
    assert_eq!(doc.tree().parent(pig_node), Some(two));
    assert_eq!(doc.tag_name(pig_node), Some("pig"));
}

#[test]
fn test_finish_loading_twice_does_not_rerender() {
    let mut doc = Document::new();
    let builder = Builder::new(&mut doc);
    builder.build(&mut doc, ".only");
    doc.finish_loading();
    doc.finish_loading();
    assert_eq!(body_tags(&doc), vec!["only"]);
}

#[test]
fn test_builder_on_loaded_document_is_ready() {
    let mut doc = Document::new();
    doc.finish_loading();
    let builder = Builder::new(&mut doc);
    assert!(builder.is_ready());
    assert!(builder.build(&mut doc, "p").is_rendered());
}

#[test]
fn test_no_deferral_when_disabled() {
    let mut doc = Document::new();
    let config = Config {
        defer_until_ready: false,
        ..Config::default()
    };
    let builder = Builder::with_config(&mut doc, config);
    let el = builder.build(&mut doc, "p now");
    assert!(el.is_rendered());
    assert!(!builder.is_ready());
    assert_eq!(builder.pending(), 0);
}

#[test]
fn test_unresolved_selector_is_noop() {
    let mut doc = Document::new();
    doc.finish_loading();
    let builder = Builder::new(&mut doc);
    let before = doc.tree().len();

    let el = builder.build_at(&mut doc, "p lost", "#missing");
    assert!(!el.is_rendered());
    assert_eq!(doc.tree().len(), before);

    let err = el.render(&mut doc, Some(&"#missing".into())).unwrap_err();
    assert!(matches!(err, RenderError::UnresolvedSelector(ref s) if s == "#missing"));
}

#[test]
fn test_location_variants() {
    let mut doc = Document::new();
    doc.finish_loading();
    let builder = Builder::new(&mut doc);

    let host = builder.build(&mut doc, "main#host");
    let host_node = host.root().unwrap();

    let by_root = builder.build_at(&mut doc, "p in-root", &host);
    assert_eq!(doc.tree().parent(by_root.root().unwrap()), Some(host_node));

    let by_node = builder.build_at(&mut doc, "p in-node", Location::Node(host_node));
    assert_eq!(doc.tree().parent(by_node.root().unwrap()), Some(host_node));

    let by_selector = builder.build_at(&mut doc, "p in-selector", "#host");
    assert_eq!(doc.tree().parent(by_selector.root().unwrap()), Some(host_node));

    assert_eq!(doc.element_children(host_node).len(), 3);
}

#[test]
fn test_unrendered_root_location() {
    let mut doc = Document::new();
    let pending: RootElement = RootElement::new("section");
    let child: RootElement = RootElement::new("p");
    let err = child
        .render(&mut doc, Some(&Location::Root(pending.clone())))
        .unwrap_err();
    assert!(matches!(err, RenderError::UnrenderedRoot));

    pending.render(&mut doc, None).unwrap();
    let node = child.render(&mut doc, Some(&(&pending).into())).unwrap();
    assert_eq!(doc.tree().parent(node), pending.root());
}

#[test]
fn test_specification_parent_is_fallback_location() {
    let mut doc = Document::new();
    doc.finish_loading();
    let builder = Builder::new(&mut doc);
    builder.build(&mut doc, "aside#side");

    let spec: Specification = Specification::new("p note").parent("#side");
    let note = builder.build(&mut doc, spec);
    let side = doc.get_element_by_id("side").unwrap();
    assert_eq!(doc.tree().parent(note.root().unwrap()), Some(side));

    // An explicit location wins over the specification's own parent.
    let spec: Specification = Specification::new("p elsewhere").parent("#side");
    let elsewhere = builder.build_at(&mut doc, spec, "body");
    assert_eq!(doc.tree().parent(elsewhere.root().unwrap()), doc.body());
}

#[test]
fn test_no_default_container() {
    let mut doc = Document::empty();
    let el: RootElement = RootElement::new("p");
    assert!(matches!(el.render(&mut doc, None), Err(RenderError::NoDefaultContainer)));
}

#[test]
fn test_rendered_listener_may_build_reentrantly() {
    let mut doc = Document::new();
    let builder = Builder::new(&mut doc);

    let nested = builder.clone();
    let spec: Specification = Specification::new("header").on(
        "rendered",
        Listener::new(move |doc, ev| {
            nested.build_at(doc, "span.late", Location::Node(ev.this()));
        }),
    );
    let header = builder.build(&mut doc, spec);
    builder.build(&mut doc, "footer");

    doc.finish_loading();

    let header_node = header.root().unwrap();
    let late = doc.query_selector("header > span.late").unwrap();
    assert_eq!(doc.tree().parent(late), Some(header_node));
    let body = doc.body().unwrap();
    let order: Vec<_> = doc
        .element_children(body)
        .into_iter()
        .map(|n| doc.tag_name(n).unwrap().to_string())
        .collect();
    assert_eq!(order, vec!["header", "footer"]);
}

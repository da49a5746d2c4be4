//! Tree materialization and event binding

use std::cell::RefCell;
use std::rc::Rc;

use elemental::{BuildError, Builder, Config, EventMap, Host, RenderError, RootElement, Spec, Specification};
use elemental_dom::{Document, DomError, Event, Listener, NodeId};

type Log = Rc<RefCell<Vec<String>>>;

fn ready_doc() -> (Document, Builder) {
    let mut doc = Document::new();
    doc.finish_loading();
    let builder = Builder::new(&mut doc);
    (doc, builder)
}

fn push(log: &Log, entry: impl Into<String>) {
    log.borrow_mut().push(entry.into());
}

fn recorder(log: &Log, entry: &str) -> Listener {
    let log = log.clone();
    let entry = entry.to_string();
    Listener::new(move |_, _| push(&log, entry.clone()))
}

/// Document wrapper that records every host call
struct Recording {
    doc: Document,
    log: Log,
}

impl Host for Recording {
    type Node = NodeId;
    type Listener = Listener;
    type Error = DomError;

    fn create_element(&mut self, tag: &str) -> NodeId {
        push(&self.log, format!("create {tag}"));
        self.doc.create_element(tag)
    }

    fn set_id(&mut self, node: NodeId, id: &str) -> Result<(), DomError> {
        self.doc.set_id(node, id)
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.doc.add_class(node, class)
    }

    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<(), DomError> {
        self.doc.set_attribute(node, key, value)
    }

    fn append_text(&mut self, parent: NodeId, text: &str) -> Result<(), DomError> {
        push(&self.log, format!("text {text}"));
        self.doc.append_text(parent, text).map(drop)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let tag = self.doc.tag_name(child).unwrap_or_default().to_string();
        push(&self.log, format!("append {tag}"));
        self.doc.append_child(parent, child).map(drop)
    }

    fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.doc.element_children(node)
    }

    fn add_event_listener(&mut self, node: NodeId, event: &str, listener: Listener) -> Result<(), DomError> {
        let tag = self.doc.tag_name(node).unwrap_or_default().to_string();
        push(&self.log, format!("listen {tag} {event}"));
        self.doc.add_event_listener(node, event, listener)
    }

    fn dispatch_event(&mut self, node: NodeId, event: &str) -> Result<(), DomError> {
        let tag = self.doc.tag_name(node).unwrap_or_default().to_string();
        push(&self.log, format!("dispatch {tag} {event}"));
        self.doc.dispatch(node, event).map(drop)
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.doc.query_selector(selector)
    }

    fn default_container(&self) -> Option<NodeId> {
        self.doc.body()
    }

    fn on_content_loaded(&mut self, callback: Box<dyn FnOnce(&mut Self)>) {
        callback(self)
    }
}

fn recording() -> (Recording, Log) {
    let log: Log = Rc::default();
    let host = Recording {
        doc: Document::new(),
        log: log.clone(),
    };
    (host, log)
}

#[test]
fn test_bare_string_leaf() {
    let (mut doc, builder) = ready_doc();
    let node = builder
        .build(&mut doc, ".one One is the loneliest number")
        .root()
        .unwrap();

    assert_eq!(doc.tag_name(node), Some("div"));
    assert!(doc.has_class(node, "one"));
    assert!(doc.element_children(node).is_empty());
    assert_eq!(doc.listeners().count_all(node), 0);
    assert_eq!(doc.text_content(node), "One is the loneliest number");
    assert_eq!(doc.tree().children(node).count(), 1);
}

#[test]
fn test_selector_text_wins_over_spec_text() {
    let (mut doc, builder) = ready_doc();
    let spec: Specification = Specification::new("p from selector").text("from spec");
    let node = builder.build(&mut doc, spec).root().unwrap();
    assert_eq!(doc.text_content(node), "from selector");

    let spec: Specification = Specification::new("p").text("from spec");
    let node = builder.build(&mut doc, spec).root().unwrap();
    assert_eq!(doc.text_content(node), "from spec");

    let spec: Specification = Specification::new("p").text("");
    let node = builder.build(&mut doc, spec).root().unwrap();
    assert_eq!(doc.tree().children(node).count(), 0);
}

#[test]
fn test_children_shapes() {
    let (mut doc, builder) = ready_doc();
    let spec: Specification = Specification::new("ul")
        .child("li.a A")
        .child(Specification::new("li.b").text("B").child("em inner"))
        .children(vec![Spec::from("li.c C")]);
    let ul = builder.build(&mut doc, spec).root().unwrap();

    let items = doc.element_children(ul);
    assert_eq!(items.len(), 3);
    assert!(doc.has_class(items[0], "a"));
    assert!(doc.has_class(items[1], "b"));
    assert!(doc.has_class(items[2], "c"));
    assert_eq!(doc.text_content(items[1]), "Binner");
    assert_eq!(doc.outer_html(ul), "<ul><li class=\"a\">A</li><li class=\"b\">B<em>inner</em></li><li class=\"c\">C</li></ul>");
}

#[test]
fn test_aggregate_events_cover_snapshot_only() {
    let (mut doc, builder) = ready_doc();
    let clicks: Log = Rc::default();
    let spec: Specification = Specification::new(".list")
        .children(["span.x one", "span.x two", "span.x three"])
        .on_children("click", recorder(&clicks, "click"));
    let list = builder.build(&mut doc, spec).root().unwrap();

    let late = doc.create_element("span");
    doc.append_child(list, late).unwrap();

    let children = doc.element_children(list);
    assert_eq!(children.len(), 4);
    for &child in &children[..3] {
        assert_eq!(doc.listeners().count(child, "click"), 1);
        doc.dispatch(child, "click").unwrap();
    }
    assert_eq!(doc.listeners().count(late, "click"), 0);
    doc.dispatch(late, "click").unwrap();

    assert_eq!(clicks.borrow().len(), 3);
}

#[test]
fn test_aggregate_listener_receiver_is_child() {
    let (mut doc, builder) = ready_doc();
    let spec: Specification = Specification::new(".cat.dog.bird")
        .children(["b one", "b two"])
        .on_children(
            "mouseover",
            Listener::new(|doc, ev| {
                let _ = doc.set_attribute(ev.this(), "style", "background: red");
            }),
        );
    let root = builder.build(&mut doc, spec).root().unwrap();
    let kids = doc.element_children(root);

    doc.dispatch(kids[1], "mouseover").unwrap();
    assert_eq!(doc.get_attribute(kids[1], "style").as_deref(), Some("background: red"));
    assert_eq!(doc.get_attribute(kids[0], "style"), None);
    assert_eq!(doc.get_attribute(root, "style"), None);
}

#[test]
fn test_aggregate_rendered_fires_per_child() {
    let (mut doc, builder) = ready_doc();
    let log: Log = Rc::default();
    let spec: Specification = Specification::new("ol")
        .children(["li a", "li b"])
        .on_children("rendered", Listener::new({
            let log = log.clone();
            move |doc, ev| push(&log, doc.text_content(ev.this()))
        }));
    builder.build(&mut doc, spec);
    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn test_own_rendered_listener_sees_live_node() {
    let (mut doc, builder) = ready_doc();
    let log: Log = Rc::default();
    let spec: Specification = Specification::new("section").on(
        "rendered",
        Listener::new({
            let log = log.clone();
            move |doc, ev| {
                let attached = doc.tree().parent(ev.this()).is_some();
                push(&log, format!("rendered attached={attached}"));
            }
        }),
    );
    builder.build(&mut doc, spec);
    assert_eq!(*log.borrow(), vec!["rendered attached=true"]);
}

#[test]
fn test_created_runs_once_before_listeners() {
    let (mut host, log) = recording();
    let builder = Builder::new(&mut host);
    let created_log = log.clone();
    let spec: Specification<Recording> = Specification::new("button.go Go")
        .created(move || push(&created_log, "created"))
        .on("click", Listener::new(|_, _| {}))
        .on("keydown", Listener::new(|_, _| {}));
    builder.build(&mut host, spec);

    assert_eq!(
        *log.borrow(),
        vec![
            "create button",
            "append button",
            "text Go",
            "created",
            "listen button click",
            "listen button keydown",
            "dispatch button rendered",
        ]
    );
}

#[test]
fn test_node_is_live_before_children_and_events() {
    let (mut host, log) = recording();
    let builder = Builder::new(&mut host);
    let spec: Specification<Recording> = Specification::new("ul")
        .child("li x")
        .on_children("click", Listener::new(|_, _| {}));
    builder.build(&mut host, spec);

    assert_eq!(
        *log.borrow(),
        vec![
            "create ul",
            "append ul",
            "dispatch ul rendered",
            "create li",
            "append li",
            "text x",
            "listen li click",
            "dispatch li rendered",
        ]
    );
}

#[test]
fn test_created_order_is_depth_first() {
    let (mut doc, builder) = ready_doc();
    let log: Log = Rc::default();
    let hook = |name: &'static str| {
        let log = log.clone();
        move || push(&log, name)
    };
    let spec: Specification = Specification::new("div")
        .created(hook("root"))
        .child(
            Specification::new("div")
                .created(hook("a"))
                .child(Specification::new("div").created(hook("a1"))),
        )
        .child(Specification::new("div").created(hook("b")));
    builder.build(&mut doc, spec);
    assert_eq!(*log.borrow(), vec!["root", "a", "a1", "b"]);
}

#[test]
fn test_listener_bound_to_own_node() {
    let (mut doc, builder) = ready_doc();
    let spec: Specification = Specification::new("button Toggle").on(
        "click",
        Listener::new(|doc, ev| {
            let _ = doc.add_class(ev.this(), "on");
        }),
    );
    let button = builder.build(&mut doc, spec).root().unwrap();
    doc.dispatch_event(button, Event::bubbling("click")).unwrap();
    assert!(doc.has_class(button, "on"));
}

#[test]
fn test_empty_event_map_still_notifies() {
    let (mut host, log) = recording();
    let builder = Builder::new(&mut host);
    let spec: Specification<Recording> = Specification::new("i").events(EventMap::new());
    builder.build(&mut host, spec);
    assert_eq!(log.borrow().last().map(String::as_str), Some("dispatch i rendered"));

    let (mut host, log) = recording();
    let builder = Builder::new(&mut host);
    let spec: Specification<Recording> = Specification::new("i");
    builder.build(&mut host, spec);
    assert!(!log.borrow().iter().any(|e| e.starts_with("dispatch")));
}

#[test]
fn test_attributes_and_properties_applied() {
    let (mut doc, builder) = ready_doc();
    let node = builder
        .build(&mut doc, "input#name.field[type=\"text\"][readonly]:required")
        .root()
        .unwrap();
    let el = doc.element(node).unwrap();
    assert_eq!(el.tag, "input");
    assert_eq!(el.id, "name");
    assert!(el.classes.contains("field"));
    assert_eq!(el.get_attr("type").as_deref(), Some("text"));
    assert_eq!(el.get_attr("readonly").as_deref(), Some("readonly"));
    assert_eq!(el.get_attr("required").as_deref(), Some("required"));
}

#[test]
fn test_depth_guard() {
    let mut doc = Document::new();
    let body = doc.body().unwrap();

    let mut spec: Specification = Specification::new("div.leaf");
    for _ in 0..5 {
        spec = Specification::new("div").child(spec);
    }
    let root = RootElement::new(spec);
    let config = Config {
        max_depth: 3,
        ..Config::default()
    };

    let err = root.render_with(&mut doc, None, &config).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Build(BuildError::CyclicSpecification { limit: 3 })
    ));
    assert!(!root.is_rendered());

    let node = root.render_with(&mut doc, None, &Config::default()).unwrap();
    assert_eq!(doc.tree().parent(node), Some(body));
}

//! Serializing into a backend other than the bundled arena.

use prosedom::render::{ElementSpec, OutputSpec};
use prosedom::schema::{MarkSpec, NodeSpec};
use prosedom::{DomSerializer, Fragment, Schema, SerializeOptions, Subtree, TreeBackend, render_spec};

/// Records every primitive call and builds nothing.
#[derive(Default)]
struct Recorder {
    next: usize,
    log: Vec<String>,
}

impl Recorder {
    fn handle(&mut self) -> usize {
        self.next += 1;
        self.next
    }
}

impl TreeBackend for Recorder {
    type Handle = usize;

    fn create_element(&mut self, tag: &str) -> usize {
        let id = self.handle();
        self.log.push(format!("element {id} {tag}"));
        id
    }

    fn create_text(&mut self, text: &str) -> usize {
        let id = self.handle();
        self.log.push(format!("text {id} {text:?}"));
        id
    }

    fn set_attribute(&mut self, element: usize, key: &str, value: &str) {
        self.log.push(format!("attr {element} {key}={value}"));
    }

    fn append_child(&mut self, parent: usize, child: usize) {
        self.log.push(format!("append {parent} {child}"));
    }

    fn create_fragment(&mut self) -> usize {
        let id = self.handle();
        self.log.push(format!("fragment {id}"));
        id
    }
}

fn schema() -> Schema {
    Schema::new(
        [
            ("doc", NodeSpec::new().content("inline*")),
            ("text", NodeSpec::new()),
        ],
        [("em", MarkSpec::new().to_dom(|_, _| ElementSpec::new("em").attr("class", "e").hole().into()))],
    )
    .unwrap()
}

#[test]
fn test_fragment_without_target_creates_container() {
    let s = schema();
    let em = s.mark("em", None).unwrap();
    let fragment = Fragment::from(vec![
        s.text("a", vec![em.clone()]).unwrap(),
        s.text("b", vec![em]).unwrap(),
    ]);

    let mut recorder = Recorder::default();
    let root = DomSerializer::from_schema(&s)
        .serialize_fragment(&fragment, &mut recorder, None, &SerializeOptions::default())
        .unwrap();

    assert_eq!(root, 1);
    assert_eq!(
        recorder.log,
        [
            "fragment 1",
            "element 2 em",
            "attr 2 class=e",
            "append 1 2",
            "text 3 \"a\"",
            "append 2 3",
            "text 4 \"b\"",
            "append 2 4",
        ]
    );
}

#[test]
fn test_fragment_into_given_target() {
    let s = schema();
    let fragment = Fragment::from(s.text("x", Vec::new()).unwrap());
    let mut recorder = Recorder {
        next: 100,
        log: Vec::new(),
    };
    let root = DomSerializer::from_schema(&s)
        .serialize_fragment(&fragment, &mut recorder, Some(7), &SerializeOptions::default())
        .unwrap();
    assert_eq!(root, 7);
    assert_eq!(recorder.log, ["text 101 \"x\"", "append 7 101"]);
}

#[test]
fn test_passthrough_replays_primitives() {
    let tree = Subtree::parse_html(r#"<figure><img src="a.png"><figcaption></figcaption></figure>"#).unwrap();
    let caption = tree.find_by_tag("figcaption");

    let mut recorder = Recorder::default();
    let rendered = render_spec(&mut recorder, &OutputSpec::rendered(tree, caption)).unwrap();

    assert_eq!(rendered.dom, 1);
    assert_eq!(rendered.hole, Some(3));
    assert_eq!(
        recorder.log,
        [
            "element 1 figure",
            "element 2 img",
            "attr 2 src=a.png",
            "append 1 2",
            "element 3 figcaption",
            "append 1 3",
        ]
    );
}

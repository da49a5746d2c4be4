//! Example: nested lists with aggregate child handlers
//!
//! Run with `RUST_LOG=elemental=trace` to watch the materialization.

use elemental::{Builder, Specification};
use elemental_dom::{Document, Listener};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let builder = Builder::new(&mut doc);

    let page: Specification = Specification::new(".a.b.c[data-id=monkey]#silly")
        .child(
            Specification::new(".red.white.blue")
                .on_children(
                    "click",
                    Listener::new(|doc, ev| println!("clicked: {}", doc.text_content(ev.this()))),
                )
                .child(
                    Specification::new("span.hello")
                        .text("Red white and blue")
                        .on("click", Listener::new(|_, _| println!("hello span clicked"))),
                )
                .child(Specification::new("span.hello").text("Mr. Deeds")),
        )
        .child(
            Specification::new(".cat.dog.bird")
                .on_children(
                    "mouseover",
                    Listener::new(|doc, ev| {
                        let _ = doc.set_attribute(ev.this(), "style", "background: red");
                    }),
                )
                .on_children(
                    "mouseout",
                    Listener::new(|doc, ev| {
                        let _ = doc.set_attribute(ev.this(), "style", "background: initial");
                    }),
                )
                .child(".one One is the loneliest number")
                .child(Specification::new(".two").text("Two is just as bad as one"))
                .child(".three Three just sucks"),
        );

    let root = builder.build(&mut doc, page);
    let pig = builder.build_at(&mut doc, "pig.horse", ".two");
    println!("queued {} builds, ready: {}", builder.pending(), builder.is_ready());

    doc.finish_loading();

    let (Some(root), Some(pig)) = (root.root(), pig.root()) else {
        anyhow::bail!("fixture did not render");
    };
    println!("{}", doc.outer_html(root));

    let first_span = doc
        .query_selector(".red > span.hello")
        .ok_or_else(|| anyhow::anyhow!("missing span"))?;
    doc.dispatch(first_span, "click")?;
    doc.dispatch(pig, "mouseover")?;

    let two = doc
        .query_selector(".two")
        .ok_or_else(|| anyhow::anyhow!("missing .two"))?;
    doc.dispatch(two, "mouseover")?;
    println!("{}", doc.outer_html(two));

    Ok(())
}

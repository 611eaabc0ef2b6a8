// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the folio-extract crate.
//
// Builds a synthetic resume page of a realistic shape (a header block, then
// a handful of sections with marked entries interleaved with unmarked layout
// wrappers) and measures the full walk + classify + format pipeline.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use folio_core::{Element, Node, Style};
use folio_extract::{extract_fragments, extract_text, format_fragments};

fn entry(top: i32, left: i32, text: String) -> Node {
    Element::new("p")
        .class("extract")
        .style(Style::new().font_size(40).with("top", top).with("left", left))
        .children(text)
        .into()
}

/// A page with `sections` sections of `entries` marked lines each.
fn resume_page(sections: usize, entries: usize) -> Node {
    let mut page = Element::new("div")
        .style(Style::new().with("width", 2480).with("height", 3508))
        .child(
            Element::new("h1")
                .role("name")
                .style(Style::new().font_size(256).font_weight("bold"))
                .children("Jane Doe"),
        )
        .child(Element::new("span").class("extract").children("jane@example.com"))
        .child(Element::new("span").class("extract").children("+1 555 123 4567"));

    for section in 0..sections {
        let mut body = Element::new("div").style(Style::new().with("top", 400 + section as i32 * 600));
        body = body.child(
            Element::new("h2")
                .class("extract")
                .children(format!("Section {section}")),
        );
        for line in 0..entries {
            // Alternate columns so the reading order has same-line work.
            let left = if line % 2 == 0 { 100 } else { 1300 };
            let top = 80 + (line / 2) as i32 * 60;
            body = body.child(
                Element::new("div")
                    .child(entry(top, left, format!("Entry {line} of section {section}, 2019 - 2023"))),
            );
        }
        page = page.child(body);
    }
    page.into()
}

fn bench_extract_text(c: &mut Criterion) {
    let page = resume_page(6, 12);

    c.bench_function("extract_text (6 sections x 12 entries)", |b| {
        b.iter(|| black_box(extract_text(black_box(&page))));
    });
}

fn bench_format_only(c: &mut Criterion) {
    let fragments = extract_fragments(&resume_page(20, 24));

    c.bench_function("format_fragments (pre-collected)", |b| {
        b.iter(|| black_box(format_fragments(black_box(&fragments))));
    });
}

criterion_group!(benches, bench_extract_text, bench_format_only);
criterion_main!(benches);

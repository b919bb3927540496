//! Rendering functions for the mdast renderer.

use super::context::{Context, Scope};
use markdown::mdast::{AlignKind, Node};

/// Renders a list node as `<ul>` or `<ol>`.
fn render_list(list: &markdown::mdast::List, ctx: &mut Context) {
    if list.ordered {
        match list.start {
            Some(start) if start != 1 => ctx.push_raw(&format!("<ol start=\"{}\">", start)),
            _ => ctx.push_raw("<ol>"),
        }
    } else {
        ctx.push_raw("<ul>");
    }
    ctx.enter(Scope::List {
        spread: list.spread,
    });

    for child in &list.children {
        render_node(child, ctx);
    }

    ctx.exit();
    ctx.push_raw(if list.ordered { "</ol>" } else { "</ul>" });
}

/// Renders a list item node as `<li>`, with a disabled checkbox for GFM tasks.
fn render_list_item(item: &markdown::mdast::ListItem, ctx: &mut Context) {
    ctx.push_raw("<li>");

    if let Some(checked) = item.checked {
        let checked_str = if checked { " checked" } else { "" };
        ctx.push_raw(&format!(
            "<input type=\"checkbox\" disabled{} /> ",
            checked_str
        ));
    }

    for child in &item.children {
        render_node(child, ctx);
    }

    ctx.push_raw("</li>");
}

/// Helper function to render a table row with proper alignment.
fn render_table_row(
    row: &markdown::mdast::TableRow,
    ctx: &mut Context,
    is_header: bool,
    aligns: &[AlignKind],
) {
    ctx.push_raw("<tr>");
    ctx.enter(Scope::TableRow);

    for (i, cell) in row.children.iter().enumerate() {
        if let Node::TableCell(c) = cell {
            let tag = if is_header { "th" } else { "td" };

            let align_attr = match aligns.get(i) {
                Some(AlignKind::Left) => " align=\"left\"",
                Some(AlignKind::Right) => " align=\"right\"",
                Some(AlignKind::Center) => " align=\"center\"",
                Some(AlignKind::None) | None => "",
            };

            ctx.push_raw(&format!("<{}{}>", tag, align_attr));
            ctx.enter(Scope::TableCell);

            for child in &c.children {
                render_node(child, ctx);
            }

            ctx.exit(); // TableCell
            ctx.push_raw(&format!("</{}>", tag));
        }
    }

    ctx.exit(); // TableRow
    ctx.push_raw("</tr>");
}

/// Renders a table node as `<table>` with `<thead>` and optional `<tbody>`.
fn render_table(table: &markdown::mdast::Table, ctx: &mut Context) {
    ctx.enter(Scope::Table);
    ctx.push_raw("<table>");

    ctx.push_raw("<thead>");
    if let Some(Node::TableRow(row)) = table.children.first() {
        render_table_row(row, ctx, true, &table.align);
    }
    ctx.push_raw("</thead>");

    if table.children.len() > 1 {
        ctx.push_raw("<tbody>");
        for row in table.children.iter().skip(1) {
            if let Node::TableRow(r) = row {
                render_table_row(r, ctx, false, &table.align);
            }
        }
        ctx.push_raw("</tbody>");
    }

    ctx.push_raw("</table>");
    ctx.exit(); // Table
}

/// Renders a paragraph node, suppressing `<p>` wrappers in tight lists.
fn render_paragraph(para: &markdown::mdast::Paragraph, ctx: &mut Context) {
    let in_tight_list = ctx.is_in_tight_list();
    if !in_tight_list {
        ctx.push_raw("<p>");
        ctx.enter(Scope::Paragraph);
    }

    for child in &para.children {
        render_node(child, ctx);
    }

    if !in_tight_list {
        ctx.exit();
        ctx.push_raw("</p>");
    }
}

fn render_heading(heading: &markdown::mdast::Heading, ctx: &mut Context) {
    let depth = heading.depth.clamp(1, 6);
    ctx.push_raw(&format!("<h{}>", depth));
    for child in &heading.children {
        render_node(child, ctx);
    }
    ctx.push_raw(&format!("</h{}>", depth));
}

/// Writes `<a href=".." title="..">children</a>`.
fn render_anchor(url: &str, title: Option<&str>, children: &[Node], ctx: &mut Context) {
    ctx.push_raw(r#"<a href=""#);
    ctx.push_attr_value(url);
    ctx.push_raw(r#"""#);

    if let Some(title) = title {
        ctx.push_raw(r#" title=""#);
        ctx.push_attr_value(title);
        ctx.push_raw(r#"""#);
    }

    ctx.push_raw(">");

    for child in children {
        render_node(child, ctx);
    }

    ctx.push_raw("</a>");
}

/// Writes `<img src=".." alt=".." title=".." />`.
fn render_img(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context) {
    ctx.push_raw(r#"<img src=""#);
    ctx.push_attr_value(url);
    ctx.push_raw(r#"""#);

    ctx.push_raw(r#" alt=""#);
    ctx.push_attr_value(alt);
    ctx.push_raw(r#"""#);

    if let Some(title) = title {
        ctx.push_raw(r#" title=""#);
        ctx.push_attr_value(title);
        ctx.push_raw(r#"""#);
    }

    ctx.push_raw(" />");
}

/// Resolves `[text][label]` against the collected definitions.
fn render_link_reference(link: &markdown::mdast::LinkReference, ctx: &mut Context) {
    let Some(target) = ctx.definition(&link.identifier).cloned() else {
        log::debug!("Link reference without definition: {}", link.identifier);
        for child in &link.children {
            render_node(child, ctx);
        }
        return;
    };
    render_anchor(&target.url, target.title.as_deref(), &link.children, ctx);
}

fn render_image_reference(image: &markdown::mdast::ImageReference, ctx: &mut Context) {
    match ctx.definition(&image.identifier).cloned() {
        Some(target) => render_img(&target.url, &image.alt, target.title.as_deref(), ctx),
        None => {
            log::debug!("Image reference without definition: {}", image.identifier);
            ctx.push_text(&image.alt);
        }
    }
}

/// Renders a fenced or indented code block; the content is never smartened.
fn render_code(code: &markdown::mdast::Code, ctx: &mut Context) {
    match code.lang.as_deref() {
        Some(lang) => {
            ctx.push_raw(r#"<pre><code class="language-"#);
            ctx.push_attr_value(lang);
            ctx.push_raw(r#"">"#);
        }
        None => ctx.push_raw("<pre><code>"),
    }
    ctx.push_code_text(&code.value);
    ctx.push_raw("</code></pre>");
}

/// Renders raw HTML, either as passthrough or escaped based on options.
fn render_html(html: &markdown::mdast::Html, ctx: &mut Context) {
    if ctx.raw_html_allowed() {
        ctx.push_raw(&html.value);
    } else {
        log::debug!(
            "Raw HTML in markdown will be escaped for security: {}",
            html.value
        );
        ctx.push_code_text(&html.value);
    }
}

/// Renders a blockquote node as `<blockquote>`.
fn render_blockquote(quote: &markdown::mdast::Blockquote, ctx: &mut Context) {
    ctx.push_raw("<blockquote>");
    for child in &quote.children {
        render_node(child, ctx);
    }
    ctx.push_raw("</blockquote>");
}

fn render_wrapped(tag: &str, children: &[Node], ctx: &mut Context) {
    ctx.push_raw(&format!("<{}>", tag));
    for child in children {
        render_node(child, ctx);
    }
    ctx.push_raw(&format!("</{}>", tag));
}

/// Recursively renders an AST node to HTML, updating the context state.
pub fn render_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                render_node(child, ctx);
            }
        }
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx),
        Node::Heading(heading) => render_heading(heading, ctx),
        Node::Strong(strong) => render_wrapped("strong", &strong.children, ctx),
        Node::Emphasis(emphasis) => render_wrapped("em", &emphasis.children, ctx),
        Node::Delete(delete) => render_wrapped("del", &delete.children, ctx),
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_code_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Code(code) => render_code(code, ctx),
        Node::Blockquote(quote) => render_blockquote(quote, ctx),
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Link(link) => render_anchor(&link.url, link.title.as_deref(), &link.children, ctx),
        Node::LinkReference(link) => render_link_reference(link, ctx),
        Node::Image(img) => render_img(&img.url, &img.alt, img.title.as_deref(), ctx),
        Node::ImageReference(img) => render_image_reference(img, ctx),
        Node::Definition(_) => {}
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Html(html) => render_html(html, ctx),
        Node::Table(table) => render_table(table, ctx),
        Node::TableRow(_) => {}
        Node::TableCell(_) => {}
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
}

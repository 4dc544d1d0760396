//! Builds the HTML [`Page`]s of the site. Every function here is pure: it
//! assembles a content fragment from posts and tags, wraps it in the layout
//! [`Template`], and returns the page. Writing happens in
//! [`crate::write::Writer`].

use crate::{
    post::Post,
    tag::{self, TagGroup, TagIndex},
    template::{Context, Template},
};

/// An output HTML file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// The file name relative to the output directory.
    pub file_name: String,

    /// The fully rendered page.
    pub contents: String,
}

/// Site-wide values the page builders need.
#[derive(Clone, Copy, Debug)]
pub struct Settings<'a> {
    /// The description of the home page.
    pub description: &'a str,

    /// The read-time label for posts that don't set one.
    pub default_read_time: &'a str,
}

/// Builds every page of the site: home, posts, tags, tag cloud and about.
pub fn all_pages(
    template: &Template,
    settings: &Settings,
    posts: &[Post],
    tags: &TagIndex,
) -> Vec<Page> {
    let mut pages = Vec::with_capacity(posts.len() + tags.len() + 3);
    pages.push(home_page(template, settings, posts));
    pages.extend(post_pages(template, settings, posts));
    pages.extend(tag_pages(template, tags));
    pages.push(tags_page(template, tags));
    pages.push(about_page(template));
    pages
}

/// The home page (`index.html`): every post, in the order given.
pub fn home_page(template: &Template, settings: &Settings, posts: &[Post]) -> Page {
    let mut items = String::new();
    for post in posts {
        items.push_str(&format!(
            r#"
<article class="article-item" data-tags="{tags}">
    <h2 class="article-title"><a href="{url}">{title}</a></h2>
    {meta}
    <div class="article-excerpt">{excerpt}</div>
    {tag_links}
</article>"#,
            tags = post.tags.join(","),
            url = post.url,
            title = post.title,
            meta = meta(post, Some(post.read_time(settings.default_read_time))),
            excerpt = post.excerpt(),
            tag_links = tag_links(&post.tags),
        ));
    }

    render(
        template,
        "index.html",
        "Home",
        settings.description,
        &format!("<div class=\"article-list\">{}\n</div>", items),
    )
}

/// One page per post (`<slug>.html`) with the full rendered body.
pub fn post_pages<'a>(
    template: &'a Template,
    settings: &'a Settings<'a>,
    posts: &'a [Post],
) -> impl Iterator<Item = Page> + 'a {
    posts.iter().map(move |post| {
        let content = format!(
            r#"<article>
    <header class="article-header">
        <h1>{title}</h1>
        {meta}
        {tag_links}
    </header>
    <div class="article-content">
{body}
    </div>
</article>"#,
            title = post.title,
            meta = meta(post, Some(post.read_time(settings.default_read_time))),
            tag_links = tag_links(&post.tags),
            body = post.body,
        );
        render(
            template,
            &post.file_name(),
            &post.title,
            post.description(),
            &content,
        )
    })
}

/// One page per tag (`tag-<tag>.html`) listing that tag's posts.
pub fn tag_pages<'a>(
    template: &'a Template,
    tags: &'a TagIndex<'a>,
) -> impl Iterator<Item = Page> + 'a {
    tags.iter().map(move |group| tag_page(template, group))
}

fn tag_page(template: &Template, group: &TagGroup) -> Page {
    let mut items = String::new();
    for post in &group.posts {
        items.push_str(&format!(
            r#"
<article class="article-item">
    <h3 class="article-title"><a href="{url}">{title}</a></h3>
    {meta}
    <div class="article-excerpt">{excerpt}</div>
</article>"#,
            url = post.url,
            title = post.title,
            meta = meta(post, None),
            excerpt = post.excerpt(),
        ));
    }

    let content = format!(
        r#"<h1>Posts tagged with "{tag}"</h1>
<div class="article-list">{items}
</div>
<p><a href="/tags.html">← Back to all tags</a></p>"#,
        tag = group.name,
        items = items,
    );
    render(
        template,
        &group.file_name(),
        &format!("Tag: {}", group.name),
        &format!("Posts tagged with {}", group.name),
        &content,
    )
}

/// The tag cloud (`tags.html`): every tag alphabetically with its post
/// count.
pub fn tags_page(template: &Template, tags: &TagIndex) -> Page {
    let cloud: String = tags
        .sorted()
        .iter()
        .map(|group| {
            format!(
                "\n    <a href=\"{}\" class=\"tag\">#{} ({})</a>",
                tag::url(group.name),
                group.name,
                group.posts.len()
            )
        })
        .collect();

    render(
        template,
        "tags.html",
        "Tags",
        "Browse posts by tags",
        &format!("<h1>All Tags</h1>\n<div class=\"tag-cloud\">{}\n</div>", cloud),
    )
}

const ABOUT: &str = r#"<h1>About</h1>
<p>Welcome to my minimalist Machine Learning blog. This site is built with a custom static site generator, deployed via GitHub Actions, and focuses on clean, readable content about ML topics.</p>

<h2>Tech Stack</h2>
<ul>
    <li>Static Site Generator (Rust)</li>
    <li>Markdown for content</li>
    <li>GitHub Actions for deployment</li>
    <li>GitHub Pages for hosting</li>
    <li>Minimalist black and white design</li>
</ul>

<h2>Contact</h2>
<p>Find me on <a href="https://github.com">GitHub</a> or reach out via email.</p>"#;

/// The about page (`about.html`). Its content is fixed.
pub fn about_page(template: &Template) -> Page {
    render(template, "about.html", "About", "About this ML blog", ABOUT)
}

fn render(
    template: &Template,
    file_name: &str,
    title: &str,
    description: &str,
    content: &str,
) -> Page {
    Page {
        file_name: file_name.to_owned(),
        contents: template.render(&Context {
            title,
            description,
            content,
        }),
    }
}

/// The date/author/read-time line. List pages for a single tag omit the read
/// time.
fn meta(post: &Post, read_time: Option<&str>) -> String {
    let mut spans = format!(
        "<span>📅 {}</span><span>👤 {}</span>",
        post.display_date(),
        post.author
    );
    if let Some(read_time) = read_time {
        spans.push_str(&format!("<span>⏱️ {}</span>", read_time));
    }
    format!("<div class=\"article-meta\">{}</div>", spans)
}

fn tag_links(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let links: String = tags
        .iter()
        .map(|t| format!("<a href=\"{}\" class=\"tag\">#{}</a>", tag::url(t), t))
        .collect();
    format!("<div class=\"tags\">{}</div>", links)
}

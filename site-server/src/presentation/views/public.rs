use std::fmt::Write;

use crate::domain::post::BlogPost;

use super::{Chrome, attr, esc, fmt_date, fmt_datetime, layout};

struct Slide {
    kicker: &'static str,
    title: &'static str,
    subtitle: &'static str,
    cta: (&'static str, &'static str),
    image_url: &'static str,
    image_alt: &'static str,
}

const EXTRA_SLIDES: [Slide; 3] = [
    Slide {
        kicker: "Community impact",
        title: "Safe spaces for every child",
        subtitle: "Warm, inclusive environments that nurture play, learning, and wellbeing.",
        cta: ("Join our programs", "/contact"),
        image_url: "https://images.unsplash.com/photo-1464375117522-1311d6a5b81f?auto=format&fit=crop&w=2000&q=80",
        image_alt: "Children playing together in a community space",
    },
    Slide {
        kicker: "Learning together",
        title: "Moments of discovery",
        subtitle: "Hands-on activities that spark curiosity and teamwork.",
        cta: ("Explore programs", "/about"),
        image_url: "https://images.unsplash.com/photo-1503454537195-1dcabb73ffb9?auto=format&fit=crop&w=2000&q=80",
        image_alt: "Kids learning together at a table",
    },
    Slide {
        kicker: "Creative play",
        title: "Art, crafts, and imagination",
        subtitle: "Spaces where children express themselves through color and shape.",
        cta: ("See workshops", "/contact"),
        image_url: "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?auto=format&fit=crop&w=2000&q=80",
        image_alt: "Children painting and drawing",
    },
];

pub(crate) fn home(chrome: &Chrome<'_>) -> String {
    let text = chrome.lang.copy();
    let mut main = String::from(r#"<main class="stack">"#);

    let _ = write!(
        main,
        r#"<section class="hero" style="background-image:url('https://images.unsplash.com/photo-1509099836639-18ba02e1c5c9?auto=format&fit=crop&w=2000&q=80')">
<div class="container hero-body">
<p class="kicker">Bhanana • Nepal</p>
<h1>{title}</h1>
<p class="lead">{subtitle}</p>
<p class="impact">{impact}</p>
<div class="actions"><a class="btn" href="/contact">{donate}</a><a class="btn ghost" href="/contact">{volunteer}</a></div>
<ul class="stats"><li>{s1}</li><li>{s2}</li><li>{s3}</li><li>{s4}</li></ul>
</div></section>"#,
        title = esc(text.hero.title),
        subtitle = esc(text.hero.subtitle),
        impact = esc(text.hero.impact),
        donate = esc(text.cta.donate),
        volunteer = esc(text.cta.volunteer),
        s1 = esc(text.stats.confidence),
        s2 = esc(text.stats.belonging),
        s3 = esc(text.stats.continuation),
        s4 = esc(text.stats.girls),
    );

    main.push_str(r#"<section class="container slides">"#);
    for slide in &EXTRA_SLIDES {
        let _ = write!(
            main,
            r#"<article class="slide"><img src="{src}" alt="{alt}" loading="lazy"><div><p class="kicker">{kicker}</p><h3>{title}</h3><p>{subtitle}</p><a class="btn ghost" href="{href}">{label}</a></div></article>"#,
            src = attr(slide.image_url),
            alt = attr(slide.image_alt),
            kicker = esc(slide.kicker),
            title = esc(slide.title),
            subtitle = esc(slide.subtitle),
            href = attr(slide.cta.1),
            label = esc(slide.cta.0),
        );
    }
    main.push_str("</section>");

    let _ = write!(
        main,
        r#"<section class="container card"><h2>{label}</h2><ul class="tiers">"#,
        label = esc(text.impact_tiers.label),
    );
    for tier in &text.impact_tiers.items {
        let _ = write!(
            main,
            "<li><strong>{}</strong> {}</li>",
            esc(tier.amount),
            esc(tier.text)
        );
    }
    let _ = write!(
        main,
        r#"</ul></section>
<section class="container card"><h2>{title}</h2><p>{body}</p><a class="btn ghost" href="{href}">Go to blog</a></section></main>"#,
        title = esc(text.blog.title),
        body = esc(text.blog.body),
        href = attr(&chrome.link("/blog")),
    );

    layout(text.nav.home, chrome, &main)
}

pub(crate) fn about(chrome: &Chrome<'_>) -> String {
    let text = chrome.lang.copy();
    let main = format!(
        r#"<section class="banner" style="background-image:url('https://images.unsplash.com/photo-1464375117522-1311d6a5b81f?auto=format&fit=crop&w=2000&q=80')">
<div class="container"><p class="kicker">About</p><h1>{about}</h1><p class="lead">{subtitle}</p></div></section>
<main class="container stack">
<section><p class="kicker">Mission</p><h2>Creating safe, playful spaces</h2><p class="lead">{subtitle}</p>
<div class="actions"><a class="btn" href="/contact">{donate}</a><a class="btn ghost" href="/contact">{volunteer}</a></div></section>
<section class="two-col">
<div><h2>{mission_title}</h2><p>{mission_body}</p><p>We focus on safe spaces, emotional wellbeing, and access to playful learning so every child feels seen, heard, and supported.</p></div>
<div><h2>{approach_title}</h2><p>{approach_body}</p><p>Our approach blends play-based learning, mental health awareness, and community participation to build confidence and belonging.</p></div>
</section>
<section><h3>What we’re working on</h3><div class="three-col">
<p>Play-based programs that nurture social-emotional growth.</p>
<p>Mentor-led sessions to build confidence and resilience.</p>
<p>Community events that celebrate inclusion and belonging.</p>
</div></section>
</main>"#,
        about = esc(text.nav.about),
        subtitle = esc(text.hero.subtitle),
        donate = esc(text.cta.donate),
        volunteer = esc(text.cta.volunteer),
        mission_title = esc(text.mission.title),
        mission_body = esc(text.mission.body),
        approach_title = esc(text.approach.title),
        approach_body = esc(text.approach.body),
    );
    layout(text.nav.about, chrome, &main)
}

pub(crate) fn contact(chrome: &Chrome<'_>) -> String {
    let text = chrome.lang.copy();
    let main = format!(
        r#"<section class="banner" style="background-image:url('https://images.unsplash.com/photo-1509099836639-18ba02e1c5c9?auto=format&fit=crop&w=2000&q=80')">
<div class="container"><p class="kicker">Contact</p><h1>{title}</h1><p class="lead">{body}</p></div></section>
<main class="container stack">
<section><h2>Ways to reach us</h2>
<p>For the fastest reply, email us at <strong>{email}</strong>. We welcome collaboration on programs and events, joint impact initiatives, and partnerships that help create safe, playful spaces for children.</p>
<p>If you’re looking to volunteer, mentor, or support on-site activities, tell us about your interests and availability and we’ll match you to sessions that fit. For media and press, we’re happy to share stories, interviews, and coverage about wellbeing, inclusion, and play.</p>
<p>Prefer a deeper collaboration? We also co-create workshops, sponsor safe-space kits, and explore joint research or pilot programs. Let us know your goals and we’ll shape something meaningful together.</p>
<div class="actions"><a class="btn" href="mailto:{email_attr}">Email us</a><a class="btn ghost" href="/about">Learn about our work</a></div>
</section></main>"#,
        title = esc(text.contact.title),
        body = esc(text.contact.body),
        email = esc(text.contact.email),
        email_attr = attr(text.contact.email),
    );
    layout(text.nav.contact, chrome, &main)
}

fn tag_pills(tags: &[String], limit: usize) -> String {
    tags.iter()
        .take(limit)
        .map(|tag| format!(r#"<span class="pill">#{}</span>"#, esc(tag)))
        .collect()
}

fn post_href(chrome: &Chrome<'_>, post: &BlogPost) -> String {
    chrome.link(&format!("/blog/{}", post.link_identifier()))
}

pub(crate) fn blog_list(chrome: &Chrome<'_>, posts: &[BlogPost]) -> String {
    let text = chrome.lang.copy();
    let mut main = format!(
        r#"<main class="container stack"><header class="card"><p class="kicker">Blog</p><div class="row"><div><h1>Stories &amp; updates</h1><p class="lead">{body}</p></div><span class="pill">{count} posts</span></div></header>"#,
        body = esc(text.blog.body),
        count = posts.len(),
    );

    let Some((featured, rest)) = posts.split_first() else {
        main.push_str(r#"<div class="card muted">No posts yet. Check back soon.</div></main>"#);
        return layout(text.nav.blog, chrome, &main);
    };

    let _ = write!(
        main,
        r#"<article class="card featured"><div><span class="pill">Featured • {date}</span><h2>{title}</h2><p class="byline">By {author}</p><p class="clamp">{body}</p><div class="tags">{tags}</div><a class="btn" href="{href}">Read more →</a></div>
<aside><p class="muted">Published</p><p class="big">{published}</p><p class="muted">Author</p><p>{author}</p></aside></article>"#,
        date = fmt_date(&featured.published_at),
        title = esc(&featured.title),
        author = esc(&featured.author),
        body = esc(&featured.body),
        tags = tag_pills(&featured.tags, usize::MAX),
        href = attr(&post_href(chrome, featured)),
        published = fmt_datetime(&featured.published_at),
    );

    if !rest.is_empty() {
        main.push_str(r#"<section class="card"><h3>More posts</h3><div class="grid">"#);
        for post in rest {
            let _ = write!(
                main,
                r#"<article class="post-card"><p class="muted">{date}</p><h4>{title}</h4><p class="byline">By {author}</p><p class="clamp">{body}</p><div class="tags">{tags}</div><a class="btn ghost" href="{href}">Read more →</a></article>"#,
                date = fmt_date(&post.published_at),
                title = esc(&post.title),
                author = esc(&post.author),
                body = esc(&post.body),
                tags = tag_pills(&post.tags, 3),
                href = attr(&post_href(chrome, post)),
            );
        }
        main.push_str("</div></section>");
    }
    main.push_str("</main>");

    layout(text.nav.blog, chrome, &main)
}

pub(crate) fn blog_detail(chrome: &Chrome<'_>, post: &BlogPost) -> String {
    // stored tags may still hold comma-joined values from older rows
    let tags: String = post
        .tags
        .iter()
        .flat_map(|tag| tag.split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| format!(r#"<span class="pill">{}</span>"#, esc(tag)))
        .collect();

    let main = format!(
        r#"<main class="container stack"><a class="btn ghost small" href="{back}">← Back to blog</a>
<article class="card"><p class="muted">{published} • {author}</p><h1>{title}</h1><div class="tags">{tags}</div><div class="prose">{body}</div></article></main>"#,
        back = attr(&chrome.link("/blog")),
        published = fmt_datetime(&post.published_at),
        author = esc(&post.author),
        title = esc(&post.title),
        body = esc(&post.body),
    );
    layout(&post.title, chrome, &main)
}

pub(crate) fn not_found(chrome: &Chrome<'_>) -> String {
    layout(
        "Not found",
        chrome,
        r#"<main class="container stack"><section class="card"><h1>Page not found</h1><p class="muted">The page you are looking for does not exist.</p><a class="btn ghost" href="/">Home</a></section></main>"#,
    )
}

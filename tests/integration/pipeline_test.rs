//! Integration tests for the export conversion pipeline
//!
//! These tests run whole exports through `ExportBuilder`.

use pressdown_core::{
    BuildError, Config, ConfigError, DataError, ExportBuilder, FieldValue, SaveImages,
};

const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0"
  xmlns:excerpt="http://wordpress.org/export/1.2/excerpt/"
  xmlns:content="http://purl.org/rss/1.0/modules/content/"
  xmlns:dc="http://purl.org/dc/elements/1.1/"
  xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
  <title>Kitchen Notes</title>
  <wp:author>
    <wp:author_login><![CDATA[jane]]></wp:author_login>
    <wp:author_display_name><![CDATA[Jane Doe]]></wp:author_display_name>
  </wp:author>

  <item>
    <title>About</title>
    <link>https://x.test/about/</link>
    <wp:post_id>3</wp:post_id>
    <wp:post_name>about</wp:post_name>
    <wp:status>publish</wp:status>
    <wp:post_type>page</wp:post_type>
    <content:encoded><![CDATA[About us]]></content:encoded>
  </item>

  <item>
    <title>Recipe Card</title>
    <link>https://x.test/recipe/card/</link>
    <wp:post_id>60</wp:post_id>
    <wp:post_name>card</wp:post_name>
    <wp:status>publish</wp:status>
    <wp:post_type>recipe</wp:post_type>
    <content:encoded><![CDATA[Card]]></content:encoded>
  </item>

  <item>
    <title>Pancakes</title>
    <link>https://x.test/p/</link>
    <pubDate>Sat, 02 Mar 2024 09:00:00 +0000</pubDate>
    <dc:creator><![CDATA[jane]]></dc:creator>
    <content:encoded><![CDATA[<p>Mix.</p>
<img class="size-full" src="a.png" />
<img src="https://x.test/wp-content/uploads/stack.jpg">]]></content:encoded>
    <excerpt:encoded><![CDATA[Fluffy
pancakes]]></excerpt:encoded>
    <wp:post_id>42</wp:post_id>
    <wp:post_name>pancakes</wp:post_name>
    <wp:status>publish</wp:status>
    <wp:post_type>post</wp:post_type>
    <category domain="category" nicename="uncategorized"><![CDATA[Uncategorized]]></category>
    <category domain="category" nicename="breakfast"><![CDATA[Breakfast]]></category>
    <category domain="post_tag" nicename="recipes"><![CDATA[Recipes]]></category>
    <wp:postmeta>
      <wp:meta_key><![CDATA[_thumbnail_id]]></wp:meta_key>
      <wp:meta_value><![CDATA[100]]></wp:meta_value>
    </wp:postmeta>
  </item>

  <item>
    <title>Waffles</title>
    <link>https://x.test/waffles/</link>
    <wp:post_id>43</wp:post_id>
    <wp:post_name>waffles</wp:post_name>
    <wp:status>draft</wp:status>
    <wp:post_type>post</wp:post_type>
    <content:encoded><![CDATA[Soon]]></content:encoded>
    <wp:postmeta>
      <wp:meta_key><![CDATA[_thumbnail_id]]></wp:meta_key>
      <wp:meta_value><![CDATA[100]]></wp:meta_value>
    </wp:postmeta>
  </item>

  <item>
    <title>Old</title>
    <wp:post_id>44</wp:post_id>
    <wp:post_name>old</wp:post_name>
    <wp:status>trash</wp:status>
    <wp:post_type>post</wp:post_type>
  </item>

  <item>
    <title>stack.jpg</title>
    <wp:post_id>100</wp:post_id>
    <wp:post_parent>42</wp:post_parent>
    <wp:post_type>attachment</wp:post_type>
    <wp:attachment_url>https://x.test/wp-content/uploads/stack.jpg</wp:attachment_url>
  </item>

  <item>
    <title>menu</title>
    <wp:post_id>200</wp:post_id>
    <wp:post_type>nav_menu_item</wp:post_type>
  </item>
</channel>
</rss>"#;

fn builder(save_images: SaveImages, fields: &[&str]) -> ExportBuilder {
    let mut config = Config::default();
    config.save_images = save_images;
    config.frontmatter_fields = fields.iter().map(|f| f.to_string()).collect();
    ExportBuilder::new(config).unwrap()
}

#[test]
fn test_posts_ordered_by_type_then_appearance() {
    let conversion = builder(SaveImages::All, &["type"]).build(EXPORT).unwrap();

    let ids: Vec<u64> = conversion.posts.iter().map(|p| p.id.as_u64()).collect();
    assert_eq!(ids, vec![42, 43, 3, 60]);

    let types: Vec<&str> = conversion
        .posts
        .iter()
        .map(|p| p.post_type.as_str())
        .collect();
    assert_eq!(types, vec!["post", "post", "page", "recipe"]);
}

#[test]
fn test_attached_url_appears_once() {
    let conversion = builder(SaveImages::All, &["title"]).build(EXPORT).unwrap();
    let pancakes = &conversion.posts[0];

    assert_eq!(
        pancakes.image_urls,
        vec![
            "https://x.test/wp-content/uploads/stack.jpg",
            "https://x.test/p/a.png",
        ]
    );
    assert_eq!(pancakes.cover_image.as_deref(), Some("stack.jpg"));
}

#[test]
fn test_shared_cover_resolves_for_each_post() {
    let conversion = builder(SaveImages::Attached, &["coverImage"]).build(EXPORT).unwrap();
    let waffles = &conversion.posts[1];

    assert_eq!(waffles.cover_image.as_deref(), Some("stack.jpg"));
    assert_eq!(
        waffles.cover_image_url.as_deref(),
        Some("https://x.test/wp-content/uploads/stack.jpg")
    );
    assert_eq!(
        waffles.frontmatter.get("coverImage"),
        Some(&FieldValue::Text("stack.jpg".into()))
    );
}

#[test]
fn test_frontmatter_fields_in_configured_order() {
    let conversion = builder(
        SaveImages::None,
        &[
            "title",
            "id:post_id",
            "author",
            "date",
            "categories",
            "tags",
            "excerpt",
            "draft",
        ],
    )
    .build(EXPORT)
    .unwrap();
    let pancakes = &conversion.posts[0];

    assert_eq!(
        pancakes.frontmatter.keys().collect::<Vec<_>>(),
        vec!["title", "post_id", "author", "date", "categories", "tags", "excerpt"]
    );
    assert_eq!(
        pancakes.frontmatter.get("categories"),
        Some(&FieldValue::List(vec!["breakfast".into()]))
    );
    assert_eq!(
        pancakes.frontmatter.get("tags"),
        Some(&FieldValue::List(vec!["recipes".into()]))
    );
    assert_eq!(
        pancakes.frontmatter.get("excerpt"),
        Some(&FieldValue::Text("Fluffy pancakes".into()))
    );
    assert_eq!(
        pancakes.frontmatter.get("date"),
        Some(&FieldValue::Text("2024-03-02".into()))
    );

    let waffles = &conversion.posts[1];
    assert_eq!(waffles.frontmatter.get("draft"), Some(&FieldValue::Flag(true)));
    assert_eq!(waffles.frontmatter.get("date"), None);
}

#[test]
fn test_unknown_frontmatter_field_fails() {
    let mut config = Config::default();
    config.frontmatter_fields = vec!["bogus".into()];

    assert!(matches!(
        ExportBuilder::new(config),
        Err(ConfigError::UnknownField(key)) if key == "bogus"
    ));
}

#[test]
fn test_relative_image_on_relative_permalink_fails_run() {
    let broken = EXPORT.replace("<link>https://x.test/p/</link>", "<link>/p/</link>");

    let result = builder(SaveImages::Scraped, &["title"]).build(&broken);
    assert!(matches!(
        result,
        Err(BuildError::Data(DataError::UnresolvableImageUrl { .. }))
    ));

    // Without scraping the same export converts fine
    assert!(builder(SaveImages::Attached, &["title"]).build(&broken).is_ok());
}

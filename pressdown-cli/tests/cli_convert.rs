use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0"
  xmlns:content="http://purl.org/rss/1.0/modules/content/"
  xmlns:dc="http://purl.org/dc/elements/1.1/"
  xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
  <wp:author>
    <wp:author_login><![CDATA[jane]]></wp:author_login>
    <wp:author_display_name><![CDATA[Jane Doe]]></wp:author_display_name>
  </wp:author>
  <item>
    <title>Hello World</title>
    <link>https://x.test/hello/</link>
    <pubDate>Wed, 06 Mar 2024 12:00:00 +0000</pubDate>
    <dc:creator><![CDATA[jane]]></dc:creator>
    <content:encoded><![CDATA[<p>Hi</p><img src="inline.png">]]></content:encoded>
    <wp:post_id>42</wp:post_id>
    <wp:post_name>hello-world</wp:post_name>
    <wp:status>publish</wp:status>
    <wp:post_type>post</wp:post_type>
    <wp:postmeta>
      <wp:meta_key><![CDATA[_thumbnail_id]]></wp:meta_key>
      <wp:meta_value><![CDATA[7]]></wp:meta_value>
    </wp:postmeta>
  </item>
  <item>
    <title>Later</title>
    <link>https://x.test/later/</link>
    <content:encoded><![CDATA[Soon]]></content:encoded>
    <wp:post_id>43</wp:post_id>
    <wp:post_name>later</wp:post_name>
    <wp:status>draft</wp:status>
    <wp:post_type>post</wp:post_type>
  </item>
  <item>
    <title>About</title>
    <link>https://x.test/about/</link>
    <content:encoded><![CDATA[About us]]></content:encoded>
    <wp:post_id>3</wp:post_id>
    <wp:post_name>about</wp:post_name>
    <wp:status>publish</wp:status>
    <wp:post_type>page</wp:post_type>
  </item>
  <item>
    <title>cover.jpg</title>
    <wp:post_id>7</wp:post_id>
    <wp:post_parent>42</wp:post_parent>
    <wp:post_type>attachment</wp:post_type>
    <wp:attachment_url>https://x.test/uploads/cover.jpg</wp:attachment_url>
  </item>
</channel>
</rss>"#;

#[test]
fn convert_writes_posts_and_image_manifest() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("export.xml"), EXPORT)?;
    fs::write(
        dir.path().join("pressdown.yml"),
        r#"
input: export.xml
output: out
frontmatter_fields:
  - title
  - date
  - coverImage
  - draft
"#,
    )?;

    #[allow(deprecated)]
    Command::cargo_bin("pressdown")?
        .current_dir(dir.path())
        .arg("convert")
        .assert()
        .success();

    let out = dir.path().join("out");
    let hello = fs::read_to_string(out.join("hello-world/index.md"))?;
    assert_eq!(
        hello,
        "---\ntitle: Hello World\ndate: 2024-03-06\ncoverImage: cover.jpg\n---\n\n<p>Hi</p><img src=\"inline.png\">\n"
    );
    assert!(out.join("page/about/index.md").exists());
    assert!(fs::read_to_string(out.join("later/index.md"))?.contains("draft: true"));

    let manifest: Value = serde_json::from_str(&fs::read_to_string(out.join("images.json"))?)?;
    assert_eq!(
        manifest["hello-world/index.md"],
        serde_json::json!([
            "https://x.test/uploads/cover.jpg",
            "https://x.test/hello/inline.png"
        ])
    );

    Ok(())
}

#[test]
fn convert_flags_override_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("site.xml"), EXPORT)?;

    #[allow(deprecated)]
    Command::cargo_bin("pressdown")?
        .current_dir(dir.path())
        .args([
            "convert",
            "--input",
            "site.xml",
            "--out-dir",
            "md",
            "--skip-drafts",
            "--frontmatter-fields",
            "id:post_id",
        ])
        .assert()
        .success();

    let md = dir.path().join("md");
    assert_eq!(
        fs::read_to_string(md.join("hello-world/index.md"))?,
        "---\npost_id: 42\n---\n\n<p>Hi</p><img src=\"inline.png\">\n"
    );
    assert!(!md.join("later/index.md").exists());

    Ok(())
}

#[test]
fn unknown_frontmatter_field_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("export.xml"), EXPORT)?;

    #[allow(deprecated)]
    Command::cargo_bin("pressdown")?
        .current_dir(dir.path())
        .args(["convert", "--frontmatter-fields", "title,bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));

    assert!(!dir.path().join("output").exists());

    Ok(())
}

#[test]
fn inspect_jsonl_emits_one_record_per_post() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("export.xml"), EXPORT)?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("pressdown")?
        .current_dir(dir.path())
        .args(["inspect", "--format", "jsonl", "--save-images", "none"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let records: Vec<Value> = stdout
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], 42);
    assert_eq!(records[0]["path"], "hello-world/index.md");
    assert_eq!(records[0]["cover_image"], "cover.jpg");
    assert_eq!(records[0]["image_urls"], serde_json::json!(["https://x.test/uploads/cover.jpg"]));
    assert_eq!(records[2]["type"], "page");

    Ok(())
}

#[test]
fn init_writes_default_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    #[allow(deprecated)]
    Command::cargo_bin("pressdown")?
        .current_dir(dir.path())
        .args(["init", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pressdown.yml"));

    let config = fs::read_to_string(dir.path().join("site/pressdown.yml"))?;
    assert!(config.contains("save_images: all"));

    Ok(())
}

//! URLs as keys: the ternary tree takes any character, the fixed trie refuses them.
use prefix_tries::{CaseFolding, Error, FixedBranchTrie, PrefixMap, TernarySearchTrie, TrieConfig};
use url::Url;

fn site() -> Result<TernarySearchTrie<&'static str>, url::ParseError> {
    let mut pages = TernarySearchTrie::with_config(TrieConfig::default().with_case(CaseFolding::Sensitive).with_wildcard('*'));

    for &(address, title) in &[
        ("https://example.com/", "Home page"),
        ("https://example.com/about", "About us"),
        ("https://example.com/contact", "Contact info"),
        ("https://example.com/blog", "Blog index"),
        ("https://example.com/blog/first-post", "First blog post"),
        ("https://example.com/blog/Second-Post", "Second blog post"),
    ] {
        let url = Url::parse(address)?;
        assert_eq!(pages.insert(url.as_str(), title), Ok(true));
    }

    Ok(pages)
}

#[test]
fn test_url_lookup() -> Result<(), url::ParseError> {
    let pages = site()?;

    let blog = Url::parse("https://example.com/blog")?;
    let unknown = Url::parse("https://example.com/unknown")?;

    assert_eq!(pages.len(), 6);
    assert_eq!(pages.get(blog.as_str()), Some(&"Blog index"));
    assert!(!pages.contains_key(unknown.as_str()));
    // Case matters for paths
    assert_eq!(pages.get("https://example.com/blog/second-post"), None);
    Ok(())
}

#[test]
fn test_url_sections() -> Result<(), url::ParseError> {
    let pages = site()?;
    let blog = Url::parse("https://example.com/blog")?;

    let section: Vec<&str> = pages.autocomplete(blog.as_str()).into_iter().map(|(_, title)| *title).collect();
    assert_eq!(section, vec!["Blog index", "Second blog post", "First blog post"]);

    let posts: Vec<String> = pages.autocomplete("https://example.com/blog/").into_iter().map(|(key, _)| key).collect();
    assert_eq!(
        posts,
        vec![
            "https://example.com/blog/Second-Post".to_string(),
            "https://example.com/blog/first-post".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn test_url_pattern() -> Result<(), url::ParseError> {
    let pages = site()?;

    // '*' is the wildcard here, so '.' in the host is literal
    let hits = pages.pattern_match("https://example.com/*****");
    assert_eq!(hits, vec![("https://example.com/about".to_string(), &"About us")]);
    Ok(())
}

#[test]
fn test_fixed_trie_rejects_urls() -> Result<(), url::ParseError> {
    let url = Url::parse("https://example.com/")?;
    let mut trie = FixedBranchTrie::new();

    assert_eq!(trie.insert(url.as_str(), ()), Err(Error::InvalidCharacter { ch: ':', position: 5 }));
    assert!(trie.is_empty());
    Ok(())
}

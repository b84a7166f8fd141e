use publisher_core::{resolve, ArticleRecord, ArticleStatus, FileDescriptor, IdSet};

fn article(path: &str) -> ArticleRecord {
    ArticleRecord::from_descriptor(FileDescriptor {
        path: path.to_string(),
        name: path.to_string(),
        size: 1,
        modified: "2024-05-01T10:00:00".to_string(),
    })
}

#[test]
fn empty_overrides_fall_back_to_global_selection() {
    let globals: IdSet = vec![1, 2].into();
    let tags: IdSet = vec![7].into();
    let x = article("x.md");

    let params = resolve(&x, &globals, &tags);
    assert_eq!(params.categories, vec![1, 2]);
    assert_eq!(params.tags, vec![7]);
}

#[test]
fn non_empty_override_wins_regardless_of_globals() {
    let globals: IdSet = vec![1, 2].into();
    let mut y = article("y.md");
    y.categories = vec![5].into();

    let params = resolve(&y, &globals, &IdSet::new());
    assert_eq!(params.categories, vec![5]);
    assert!(params.tags.is_empty());
}

#[test]
fn categories_and_tags_resolve_independently() {
    let mut article = article("z.md");
    article.tags = vec![30, 31].into();

    let params = resolve(&article, &vec![1].into(), &vec![9].into());
    assert_eq!(params.categories, vec![1]);
    assert_eq!(params.tags, vec![30, 31]);
}

#[test]
fn status_is_always_the_articles_own() {
    let mut article = article("s.md");
    assert_eq!(
        resolve(&article, &IdSet::new(), &IdSet::new()).status,
        ArticleStatus::Draft
    );
    article.status = ArticleStatus::Publish;
    assert_eq!(
        resolve(&article, &IdSet::new(), &IdSet::new()).status,
        ArticleStatus::Publish
    );
}

#[test]
fn resolve_is_idempotent() {
    let mut article = article("i.md");
    article.categories = vec![4, 3].into();
    let globals: IdSet = vec![1].into();

    let first = resolve(&article, &globals, &globals);
    let second = resolve(&article, &globals, &globals);
    assert_eq!(first, second);
    assert_eq!(article.categories.as_slice(), &[4, 3]);
}

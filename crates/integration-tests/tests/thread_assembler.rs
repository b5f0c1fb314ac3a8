//! Thread-assembler behavior over the in-memory store: chain depth and
//! ordering, live counts, and traversal termination on corrupt data.


use domains::AppError;
use fixtures::harness;

#[tokio::test]
async fn chain_length_equals_depth_below_root() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");

    let root = h.posts.create_post(ferris.id, "root", None).await.unwrap();
    let mut parent = root.id;
    let mut ids = vec![root.id];
    for depth in 1..=4 {
        let reply = h
            .posts
            .create_post(ferris.id, &format!("depth {depth}"), Some(parent))
            .await
            .unwrap();
        ids.push(reply.id);
        parent = reply.id;
    }

    let leaf = h.posts.get_post(parent).await.unwrap();
    assert_eq!(leaf.parent_chain.len(), 4);
    // Nearest ancestor first, root last.
    let chain_ids: Vec<i64> = leaf.parent_chain.iter().map(|s| s.id).collect();
    let mut expected: Vec<i64> = ids[..4].to_vec();
    expected.reverse();
    assert_eq!(chain_ids, expected);
    assert_eq!(chain_ids[0], leaf.reply_to.unwrap());
}

#[tokio::test]
async fn root_posts_format_with_empty_chain() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");
    let root = h.posts.create_post(ferris.id, "hello", None).await.unwrap();

    assert!(!root.is_reply);
    assert!(root.parent_chain.is_empty());
    assert_eq!(root.reply_count, 0);
}

#[tokio::test]
async fn reply_counts_are_read_live() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");
    let root = h.posts.create_post(ferris.id, "root", None).await.unwrap();

    assert_eq!(h.posts.get_post(root.id).await.unwrap().reply_count, 0);
    h.posts
        .create_post(ferris.id, "reply", Some(root.id))
        .await
        .unwrap();
    assert_eq!(h.posts.get_post(root.id).await.unwrap().reply_count, 1);
}

#[tokio::test]
async fn like_counts_in_the_chain_are_read_live() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");
    let alice = h.db.insert_user("alice", "hash");
    let root = h.posts.create_post(ferris.id, "root", None).await.unwrap();
    let reply = h
        .posts
        .create_post(alice.id, "reply", Some(root.id))
        .await
        .unwrap();

    h.posts.like(alice.id, root.id).await.unwrap();

    let view = h.posts.get_post(reply.id).await.unwrap();
    assert_eq!(view.parent_chain[0].like_count, 1);

    h.posts.unlike(alice.id, root.id).await.unwrap();
    let view = h.posts.get_post(reply.id).await.unwrap();
    assert_eq!(view.parent_chain[0].like_count, 0);
}

#[tokio::test]
async fn dangling_parent_reference_truncates_instead_of_failing() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");
    let orphan = h.db.insert_post(ferris.id, "orphan reply", Some(9999));

    let view = h.posts.get_post(orphan.id).await.unwrap();
    assert!(view.is_reply);
    assert!(view.parent_chain.is_empty());
}

#[tokio::test]
async fn cyclic_reply_data_still_terminates() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");
    let a = h.db.insert_post(ferris.id, "a", None);
    let b = h.db.insert_post(ferris.id, "b", Some(a.id));
    let c = h.db.insert_post(ferris.id, "c", Some(b.id));
    // Corrupt the store: the root now replies to the leaf.
    h.db.set_reply_to(a.id, Some(c.id));

    let view = h.posts.get_post(c.id).await.unwrap();
    let chain_ids: Vec<i64> = view.parent_chain.iter().map(|s| s.id).collect();
    assert_eq!(chain_ids, vec![b.id, a.id]);
}

#[tokio::test]
async fn reply_to_a_missing_parent_creates_no_row() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");

    let err = h
        .posts
        .create_post(ferris.id, "hello", Some(404))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Parent post not found"));
    assert_eq!(h.db.post_count(), 0);
}

#[tokio::test]
async fn author_listing_formats_every_post_newest_first() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");
    let first = h.posts.create_post(ferris.id, "first", None).await.unwrap();
    let second = h
        .posts
        .create_post(ferris.id, "second", Some(first.id))
        .await
        .unwrap();

    let listing = h.posts.posts_by("ferris").await.unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, second.id);
    assert!(listing[0].is_reply);
    assert_eq!(listing[0].parent_chain[0].id, first.id);
    assert_eq!(listing[1].id, first.id);
}

#[tokio::test]
async fn liked_posts_are_flat_summaries() {
    let h = harness(None);
    let ferris = h.db.insert_user("ferris", "hash");
    let alice = h.db.insert_user("alice", "hash");
    let root = h.posts.create_post(ferris.id, "root", None).await.unwrap();
    let reply = h
        .posts
        .create_post(ferris.id, "reply", Some(root.id))
        .await
        .unwrap();

    h.posts.like(alice.id, reply.id).await.unwrap();

    let liked = h.posts.liked_posts("alice").await.unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].id, reply.id);
    assert_eq!(liked[0].like_count, 1);
}

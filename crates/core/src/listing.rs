//! Lazy listings over the paged `ObjectStore` calls

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::error::{Error, Result};
use crate::traits::{Bucket, ObjectInfo, ObjectStore};

enum Cursor {
    Start,
    Next(String),
    Done,
}

impl Cursor {
    fn after(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Cursor::Next(token),
            _ => Cursor::Done,
        }
    }
}

/// Stream every bucket visible to the caller, fetching pages on demand
pub fn all_buckets(store: &dyn ObjectStore) -> BoxStream<'_, Result<Bucket>> {
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let token = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
        };

        let page = store.list_buckets(token).await?;
        Ok::<_, Error>(Some((page.buckets, Cursor::after(page.continuation_token))))
    })
    .map_ok(|buckets| stream::iter(buckets.into_iter().map(Ok::<_, Error>)))
    .try_flatten()
    .boxed()
}

/// Stream every object in `bucket`, fetching pages on demand
pub fn all_objects<'a>(
    store: &'a dyn ObjectStore,
    bucket: &'a str,
) -> BoxStream<'a, Result<ObjectInfo>> {
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let token = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
        };

        let page = store.list_objects(bucket, token).await?;
        let next = if page.truncated {
            Cursor::after(page.continuation_token)
        } else {
            Cursor::Done
        };
        Ok::<_, Error>(Some((page.items, next)))
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok::<_, Error>)))
    .try_flatten()
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{BucketPage, ListResult, MockObjectStore};
    use mockall::predicate::eq;

    fn page(keys: &[&str], next: Option<&str>) -> ListResult {
        ListResult {
            items: keys.iter().map(|k| ObjectInfo::file(*k, 1)).collect(),
            truncated: next.is_some(),
            continuation_token: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_all_objects_follows_continuation() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .with(eq("my-site"), eq(None::<String>))
            .times(1)
            .returning(|_, _| Ok(page(&["a.html", "b.html"], Some("t1"))));
        store
            .expect_list_objects()
            .with(eq("my-site"), eq(Some("t1".to_string())))
            .times(1)
            .returning(|_, _| Ok(page(&["c.html"], None)));

        let keys: Vec<String> = all_objects(&store, "my-site")
            .map_ok(|o| o.key)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(keys, vec!["a.html", "b.html", "c.html"]);
    }

    #[tokio::test]
    async fn test_all_objects_is_lazy() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .times(1)
            .returning(|_, _| Ok(page(&["a.html"], Some("t1"))));

        let first = all_objects(&store, "my-site").next().await;
        assert_eq!(first.unwrap().unwrap().key, "a.html");
    }

    #[tokio::test]
    async fn test_all_objects_propagates_error() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .times(1)
            .returning(|bucket, _| Err(Error::NotFound(format!("Bucket not found: {bucket}"))));

        let result: Result<Vec<ObjectInfo>> = all_objects(&store, "gone").try_collect().await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_all_buckets_single_page() {
        let mut store = MockObjectStore::new();
        store.expect_list_buckets().times(1).returning(|_| {
            Ok(BucketPage {
                buckets: vec![Bucket::new("alpha"), Bucket::new("beta")],
                continuation_token: None,
            })
        });

        let names: Vec<String> = all_buckets(&store)
            .map_ok(|b| b.name)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(names, vec!["alpha", "beta"]);
    }
}

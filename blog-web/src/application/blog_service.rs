use tracing::info;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostWithAuthor, UpdatePostRequest};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        self.repo.list_posts().await
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            body: req.body,
            author_id,
        };
        let post = self.repo.create_post(new_post).await?;

        info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    /// NotFound takes precedence over Forbidden.
    pub(crate) async fn get_owned_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<Post, DomainError> {
        let post = self.get_post(post_id).await?;
        if !post.is_authored_by(actor_user_id) {
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        self.get_owned_post(actor_user_id, post_id).await?;

        let req = req.validate()?;
        let patch = PostPatch {
            title: req.title,
            body: req.body,
        };
        let post = self
            .repo
            .update_post_owned(post_id, actor_user_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {post_id}")))?;

        info!(post_id, author_id = actor_user_id, "post updated");
        Ok(post)
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        self.get_owned_post(actor_user_id, post_id).await?;

        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        info!(post_id, author_id = actor_user_id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::BlogService;
    use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, Post, PostWithAuthor, UpdatePostRequest};

    #[derive(Clone)]
    struct FakePostRepo {
        created_input: Arc<Mutex<Option<NewPost>>>,
        post_for_get: Arc<Mutex<Option<Post>>>,
        update_owned_call: Arc<Mutex<Option<(i64, i64, PostPatch)>>>,
        delete_called: Arc<Mutex<bool>>,
        list_result: Arc<Mutex<Vec<PostWithAuthor>>>,
    }

    impl FakePostRepo {
        fn new() -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                post_for_get: Arc::new(Mutex::new(None)),
                update_owned_call: Arc::new(Mutex::new(None)),
                delete_called: Arc::new(Mutex::new(false)),
                list_result: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn with_post(post: Post) -> Self {
            let repo = Self::new();
            *repo
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned") = Some(post);
            repo
        }

        fn update_call(&self) -> Option<(i64, i64, PostPatch)> {
            self.update_owned_call
                .lock()
                .expect("update_owned_call mutex poisoned")
                .clone()
        }

        fn delete_called(&self) -> bool {
            *self
                .delete_called
                .lock()
                .expect("delete_called mutex poisoned")
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(sample_post(1, &input.title, &input.body, input.author_id))
        }

        async fn get_post(&self, _id: i64) -> Result<Option<Post>, DomainError> {
            Ok(self
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned")
                .clone())
        }

        async fn update_post_owned(
            &self,
            post_id: i64,
            owner_id: i64,
            patch: PostPatch,
        ) -> Result<Option<Post>, DomainError> {
            *self
                .update_owned_call
                .lock()
                .expect("update_owned_call mutex poisoned") =
                Some((post_id, owner_id, patch.clone()));
            Ok(Some(sample_post(post_id, &patch.title, &patch.body, owner_id)))
        }

        async fn delete_post(&self, _id: i64) -> Result<bool, DomainError> {
            *self
                .delete_called
                .lock()
                .expect("delete_called mutex poisoned") = true;
            Ok(true)
        }

        async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
            Ok(self
                .list_result
                .lock()
                .expect("list_result mutex poisoned")
                .clone())
        }
    }

    #[tokio::test]
    async fn create_post_normalizes_request_before_repo_call() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo.clone());

        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            body: "body".to_string(),
        };

        let created = service
            .create_post(10, req)
            .await
            .expect("create_post must succeed");
        assert_eq!(created.title, "title");

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.title, "title");
        assert_eq!(input.author_id, 10);
    }

    #[tokio::test]
    async fn create_post_requires_title() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo.clone());

        let req = CreatePostRequest {
            title: String::new(),
            body: "body".to_string(),
        };

        let err = service
            .create_post(10, req)
            .await
            .expect_err("create_post must fail");
        assert_eq!(err.to_string(), "Title is required.");
        assert!(
            repo.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn get_post_returns_not_found_when_missing() {
        let service = BlogService::new(FakePostRepo::new());

        let err = service
            .get_post(42)
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_passes_owner_to_repo() {
        let repo = FakePostRepo::with_post(sample_post(7, "old", "body", 10));
        let service = BlogService::new(repo.clone());

        let req = UpdatePostRequest {
            title: "  new  ".to_string(),
            body: "updated".to_string(),
        };

        let updated = service
            .update_post(10, 7, req)
            .await
            .expect("update must succeed");
        assert_eq!(updated.id, 7);
        assert_eq!(updated.title, "new");

        let call = repo.update_call().expect("update call must be captured");
        assert_eq!(call.0, 7);
        assert_eq!(call.1, 10);
        assert_eq!(call.2.title, "new");
        assert_eq!(call.2.body, "updated");
    }

    #[tokio::test]
    async fn update_post_checks_missing_before_validation() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo.clone());

        let req = UpdatePostRequest {
            title: String::new(),
            body: String::new(),
        };

        let err = service
            .update_post(10, 7, req)
            .await
            .expect_err("must be not found");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(repo.update_call().is_none());
    }

    #[tokio::test]
    async fn update_post_checks_owner_before_validation() {
        let repo = FakePostRepo::with_post(sample_post(7, "title", "body", 99));
        let service = BlogService::new(repo.clone());

        let req = UpdatePostRequest {
            title: String::new(),
            body: String::new(),
        };

        let err = service
            .update_post(10, 7, req)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(repo.update_call().is_none());
    }

    #[tokio::test]
    async fn update_post_requires_title_for_owner() {
        let repo = FakePostRepo::with_post(sample_post(7, "title", "body", 10));
        let service = BlogService::new(repo.clone());

        let req = UpdatePostRequest {
            title: "   ".to_string(),
            body: String::new(),
        };

        let err = service
            .update_post(10, 7, req)
            .await
            .expect_err("must fail validation");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
        assert!(repo.update_call().is_none());
    }

    #[tokio::test]
    async fn delete_post_returns_forbidden_for_non_owner() {
        let repo = FakePostRepo::with_post(sample_post(7, "title", "body", 99));
        let service = BlogService::new(repo.clone());

        let err = service
            .delete_post(10, 7)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(!repo.delete_called());
    }

    #[tokio::test]
    async fn delete_post_removes_owned_post() {
        let repo = FakePostRepo::with_post(sample_post(7, "title", "body", 10));
        let service = BlogService::new(repo.clone());

        service
            .delete_post(10, 7)
            .await
            .expect("delete must succeed");
        assert!(repo.delete_called());
    }

    #[tokio::test]
    async fn list_posts_returns_repo_order() {
        let repo = FakePostRepo::new();
        *repo.list_result.lock().expect("list_result mutex poisoned") = vec![
            PostWithAuthor {
                post: sample_post(2, "newer", "b", 10),
                author_username: "test".to_string(),
            },
            PostWithAuthor {
                post: sample_post(1, "older", "a", 10),
                author_username: "test".to_string(),
            },
        ];

        let service = BlogService::new(repo);
        let posts = service.list_posts().await.expect("list_posts must succeed");

        let ids: Vec<i64> = posts.iter().map(|entry| entry.post.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    fn sample_post(id: i64, title: &str, body: &str, author_id: i64) -> Post {
        Post::new(id, title, body, author_id, Utc::now()).expect("sample post must be valid")
    }
}

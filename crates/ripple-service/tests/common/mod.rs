//! Shared test fixtures: an in-memory store implementing every store
//! trait, with query counters for asserting batching behavior.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use uuid::Uuid;

use ripple_core::result::AppResult;
use ripple_core::traits::cache::CacheProvider;
use ripple_database::store::{
    CommentStore, EngagementStore, FollowStore, NotificationStore, PostStore, UserStore,
};
use ripple_entity::engagement::{Comment, Follow, FollowCounts, Like, Save};
use ripple_entity::notification::{Notification, NotificationKind};
use ripple_entity::post::{Post, PostCategory};
use ripple_entity::user::{User, UserProfile, UserRole};

/// In-memory store backing the service tests.
#[derive(Default)]
pub struct MemStore {
    pub users: Mutex<Vec<User>>,
    pub posts: Mutex<Vec<Post>>,
    pub follows: Mutex<Vec<Follow>>,
    pub likes: Mutex<Vec<Like>>,
    pub saves: Mutex<Vec<Save>>,
    pub comments: Mutex<Vec<Comment>>,
    pub notifications: Mutex<Vec<Notification>>,
    /// Number of batched liked-membership queries issued.
    pub liked_queries: AtomicUsize,
    /// Number of batched saved-membership queries issued.
    pub saved_queries: AtomicUsize,
}

/// Initialise test logging once per binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ripple_service=debug")
        .with_test_writer()
        .try_init();
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a member user.
    pub fn add_user(&self, username: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            display_name: None,
            avatar_url: None,
            bio: None,
            role: UserRole::Member,
            follower_count: 0,
            following_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Seed a user with a preset follower count (for popularity ranking).
    pub fn add_user_with_followers(&self, username: &str, follower_count: i32) -> User {
        let mut user = self.add_user(username);
        user.follower_count = follower_count;
        let mut users = self.users.lock().unwrap();
        users.last_mut().unwrap().follower_count = follower_count;
        drop(users);
        user
    }

    /// Seed a public post created `age_minutes` ago.
    pub fn add_post(&self, author_id: Uuid, category: PostCategory, age_minutes: i64) -> Post {
        self.add_post_full(author_id, category, 0, 0, age_minutes, true)
    }

    /// Seed a post with full control over counters, age, and visibility.
    pub fn add_post_full(
        &self,
        author_id: Uuid,
        category: PostCategory,
        like_count: i32,
        save_count: i32,
        age_minutes: i64,
        is_public: bool,
    ) -> Post {
        let created_at = Utc::now() - ChronoDuration::minutes(age_minutes);
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            title: format!("post-{}", Uuid::new_v4()),
            description: None,
            image_url: "https://img.example.com/p.jpg".to_string(),
            category,
            tags: Vec::new(),
            like_count,
            save_count,
            comment_count: 0,
            is_public,
            created_at,
            updated_at: created_at,
        };
        self.posts.lock().unwrap().push(post.clone());
        post
    }

    /// Seed a follow edge with the matching counter updates.
    pub fn add_follow(&self, follower_id: Uuid, following_id: Uuid) {
        self.follows.lock().unwrap().push(Follow {
            id: Uuid::new_v4(),
            follower_id,
            following_id,
            created_at: Utc::now(),
        });
        for user in self.users.lock().unwrap().iter_mut() {
            if user.id == following_id {
                user.follower_count += 1;
            }
            if user.id == follower_id {
                user.following_count += 1;
            }
        }
    }

    /// Seed a raw like edge created `age_minutes` ago, without touching
    /// the post counter (for recommendation-scan fixtures).
    pub fn add_like_edge(&self, user_id: Uuid, post_id: Uuid, age_minutes: i64) {
        self.likes.lock().unwrap().push(Like {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now() - ChronoDuration::minutes(age_minutes),
        });
    }

    /// Seed a raw save edge without touching the post counter.
    pub fn add_save_edge(&self, user_id: Uuid, post_id: Uuid) {
        self.saves.lock().unwrap().push(Save {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now(),
        });
    }

    /// Seed a notification created `age_hours` ago.
    pub fn add_notification(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        kind: NotificationKind,
        post_id: Option<Uuid>,
        age_hours: i64,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id,
            actor_id,
            kind,
            post_id,
            comment_id: None,
            is_read: false,
            created_at: Utc::now() - ChronoDuration::hours(age_hours),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        notification
    }

    pub fn user_by_id(&self, id: Uuid) -> User {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .expect("user not seeded")
    }

    pub fn post_by_id(&self, id: Uuid) -> Post {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .expect("post not seeded")
    }
}

/// HashMap-backed cache double, so cache assertions do not depend on
/// the production cache's eviction timing. Per-entry TTLs are recorded
/// rather than enforced so tests can assert what was requested.
#[derive(Debug, Default)]
pub struct MemCache {
    pub entries: Mutex<HashMap<String, String>>,
    pub ttls: Mutex<HashMap<String, Duration>>,
}

impl MemCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheProvider for MemCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.ttls.lock().unwrap().insert(key.to_string(), ttl);
        self.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> AppResult<u64> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.lock().unwrap().contains_key(key))
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn profiles_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<UserProfile>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .map(User::profile)
            .collect())
    }

    async fn profiles_by_categories(
        &self,
        categories: &[PostCategory],
        exclude: &[Uuid],
        limit: i64,
    ) -> AppResult<Vec<UserProfile>> {
        let posts = self.posts.lock().unwrap();
        let authors: HashSet<Uuid> = posts
            .iter()
            .filter(|p| p.is_public && categories.contains(&p.category))
            .map(|p| p.author_id)
            .collect();
        drop(posts);

        let mut matches: Vec<UserProfile> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| authors.contains(&u.id) && !exclude.contains(&u.id))
            .map(User::profile)
            .collect();
        matches.sort_by(|a, b| b.follower_count.cmp(&a.follower_count));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn most_followed(&self, exclude: &[Uuid], limit: i64) -> AppResult<Vec<UserProfile>> {
        let mut matches: Vec<UserProfile> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| !exclude.contains(&u.id))
            .map(User::profile)
            .collect();
        matches.sort_by(|a, b| b.follower_count.cmp(&a.follower_count));
        matches.truncate(limit as usize);
        Ok(matches)
    }
}

#[async_trait]
impl PostStore for MemStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn public_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        let mut matches: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_public && author_ids.contains(&p.author_id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn popular_since(
        &self,
        since: DateTime<Utc>,
        exclude: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        let mut matches: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_public && p.created_at >= since && !exclude.contains(&p.id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.like_count
                .cmp(&a.like_count)
                .then(b.save_count.cmp(&a.save_count))
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(matches
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn public_by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        self.public_by_authors(&[author_id], limit, offset).await
    }

    async fn count_public(&self) -> AppResult<u64> {
        Ok(self.posts.lock().unwrap().iter().filter(|p| p.is_public).count() as u64)
    }

    async fn count_public_by_author(&self, author_id: Uuid) -> AppResult<u64> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_public && p.author_id == author_id)
            .count() as u64)
    }
}

#[async_trait]
impl FollowStore for MemStore {
    async fn following_ids(&self, follower_id: Uuid) -> AppResult<Vec<Uuid>> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == follower_id)
            .map(|f| f.following_id)
            .collect())
    }

    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.follower_id == follower_id && f.following_id == following_id))
    }

    async fn create(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<FollowCounts> {
        self.follows.lock().unwrap().push(Follow {
            id: Uuid::new_v4(),
            follower_id,
            following_id,
            created_at: Utc::now(),
        });

        let mut users = self.users.lock().unwrap();
        let mut counts = FollowCounts {
            follower_count: 0,
            following_count: 0,
        };
        for user in users.iter_mut() {
            if user.id == following_id {
                user.follower_count += 1;
                counts.follower_count = user.follower_count;
            }
            if user.id == follower_id {
                user.following_count += 1;
                counts.following_count = user.following_count;
            }
        }
        Ok(counts)
    }

    async fn delete(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<FollowCounts> {
        self.follows
            .lock()
            .unwrap()
            .retain(|f| !(f.follower_id == follower_id && f.following_id == following_id));

        let mut users = self.users.lock().unwrap();
        let mut counts = FollowCounts {
            follower_count: 0,
            following_count: 0,
        };
        for user in users.iter_mut() {
            if user.id == following_id {
                user.follower_count -= 1;
                counts.follower_count = user.follower_count;
            }
            if user.id == follower_id {
                user.following_count -= 1;
                counts.following_count = user.following_count;
            }
        }
        Ok(counts)
    }

    async fn second_degree_ids(
        &self,
        follower_ids: &[Uuid],
        exclude: &[Uuid],
        limit: i64,
    ) -> AppResult<Vec<Uuid>> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for follow in self.follows.lock().unwrap().iter() {
            if result.len() >= limit as usize {
                break;
            }
            if follower_ids.contains(&follow.follower_id)
                && !exclude.contains(&follow.following_id)
                && seen.insert(follow.following_id)
            {
                result.push(follow.following_id);
            }
        }
        Ok(result)
    }

    async fn followers_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>> {
        let mut edges: Vec<Follow> = self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.following_id == user_id)
            .cloned()
            .collect();
        edges.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let ids: Vec<Uuid> = edges
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|f| f.follower_id)
            .collect();
        self.ordered_profiles(&ids)
    }

    async fn following_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>> {
        let mut edges: Vec<Follow> = self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == user_id)
            .cloned()
            .collect();
        edges.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let ids: Vec<Uuid> = edges
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|f| f.following_id)
            .collect();
        self.ordered_profiles(&ids)
    }

    async fn count_followers(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.following_id == user_id)
            .count() as u64)
    }

    async fn count_following(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == user_id)
            .count() as u64)
    }
}

impl MemStore {
    fn ordered_profiles(&self, ids: &[Uuid]) -> AppResult<Vec<UserProfile>> {
        let users = self.users.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| users.iter().find(|u| u.id == *id).map(User::profile))
            .collect())
    }
}

#[async_trait]
impl EngagementStore for MemStore {
    async fn liked_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> AppResult<HashSet<Uuid>> {
        self.liked_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id && post_ids.contains(&l.post_id))
            .map(|l| l.post_id)
            .collect())
    }

    async fn saved_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> AppResult<HashSet<Uuid>> {
        self.saved_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .saves
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id && post_ids.contains(&s.post_id))
            .map(|s| s.post_id)
            .collect())
    }

    async fn like_exists(&self, user_id: Uuid, post_id: Uuid) -> AppResult<bool> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.user_id == user_id && l.post_id == post_id))
    }

    async fn save_exists(&self, user_id: Uuid, post_id: Uuid) -> AppResult<bool> {
        Ok(self
            .saves
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.user_id == user_id && s.post_id == post_id))
    }

    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.likes.lock().unwrap().push(Like {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now(),
        });
        self.adjust_counter(post_id, |p| {
            p.like_count += 1;
            p.like_count
        })
    }

    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.likes
            .lock()
            .unwrap()
            .retain(|l| !(l.user_id == user_id && l.post_id == post_id));
        self.adjust_counter(post_id, |p| {
            p.like_count -= 1;
            p.like_count
        })
    }

    async fn create_save(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.saves.lock().unwrap().push(Save {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            created_at: Utc::now(),
        });
        self.adjust_counter(post_id, |p| {
            p.save_count += 1;
            p.save_count
        })
    }

    async fn delete_save(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.saves
            .lock()
            .unwrap()
            .retain(|s| !(s.user_id == user_id && s.post_id == post_id));
        self.adjust_counter(post_id, |p| {
            p.save_count -= 1;
            p.save_count
        })
    }

    async fn recent_liked_categories(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PostCategory>> {
        let mut edges: Vec<Like> = self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        edges.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let posts = self.posts.lock().unwrap();
        Ok(edges
            .into_iter()
            .take(limit as usize)
            .filter_map(|l| posts.iter().find(|p| p.id == l.post_id).map(|p| p.category))
            .collect())
    }
}

impl MemStore {
    fn adjust_counter(
        &self,
        post_id: Uuid,
        f: impl FnOnce(&mut Post) -> i32,
    ) -> AppResult<i32> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .expect("post not seeded");
        Ok(f(post))
    }
}

#[async_trait]
impl CommentStore for MemStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> AppResult<(Comment, i32)> {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.comments.lock().unwrap().push(comment.clone());
        let count = self.adjust_counter(post_id, |p| {
            p.comment_count += 1;
            p.comment_count
        })?;
        Ok((comment, count))
    }

    async fn delete(&self, comment_id: Uuid) -> AppResult<i32> {
        let mut comments = self.comments.lock().unwrap();
        let pos = comments
            .iter()
            .position(|c| c.id == comment_id)
            .expect("comment not seeded");
        let comment = comments.remove(pos);
        drop(comments);
        self.adjust_counter(comment.post_id, |p| {
            p.comment_count -= 1;
            p.comment_count
        })
    }
}

#[async_trait]
impl NotificationStore for MemStore {
    async fn find_duplicate(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        kind: NotificationKind,
        post_id: Option<Uuid>,
        comment_id: Option<Uuid>,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let mut matches: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| {
                n.recipient_id == recipient_id
                    && n.actor_id == actor_id
                    && n.kind == kind
                    && n.post_id == post_id
                    && n.comment_id == comment_id
                    && n.created_at >= since
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches.into_iter().next())
    }

    async fn insert(&self, notification: &Notification) -> AppResult<Notification> {
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Notification>> {
        let mut matches: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_recipient(&self, recipient_id: Uuid) -> AppResult<u64> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .count() as u64)
    }

    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<u64> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as u64)
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<()> {
        for n in self.notifications.lock().unwrap().iter_mut() {
            if n.id == id {
                n.is_read = true;
            }
        }
        Ok(())
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64> {
        let mut updated = 0;
        for n in self.notifications.lock().unwrap().iter_mut() {
            if n.recipient_id == recipient_id && !n.is_read {
                n.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.notifications.lock().unwrap().retain(|n| n.id != id);
        Ok(())
    }
}

pub mod client {
    use anyhow::Result;
    use reqwest::Client;
    use tuiter_common::{
        Bookmark, Credentials, DeleteStatus, Dislike, Follow, Like, Message, NewMessage, NewTuit,
        NewUser, Tuit, UpdateStatus, UpdateTuit, UpdateUser, User,
    };

    pub async fn find_all_users(client: &Client, base: &str) -> Result<Vec<User>> {
        Ok(client
            .get(format!("{base}/users"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_user_by_id(client: &Client, base: &str, uid: &str) -> Result<Option<User>> {
        Ok(client
            .get(format!("{base}/users/{uid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn create_user(client: &Client, base: &str, user: &NewUser) -> Result<User> {
        Ok(client
            .post(format!("{base}/users"))
            .json(user)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn update_user(
        client: &Client,
        base: &str,
        uid: &str,
        update: &UpdateUser,
    ) -> Result<UpdateStatus> {
        Ok(client
            .put(format!("{base}/users/{uid}"))
            .json(update)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn delete_user(client: &Client, base: &str, uid: &str) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/users/{uid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn find_all_tuits(client: &Client, base: &str) -> Result<Vec<Tuit>> {
        Ok(client
            .get(format!("{base}/tuits"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_tuit_by_id(client: &Client, base: &str, tid: &str) -> Result<Option<Tuit>> {
        Ok(client
            .get(format!("{base}/tuits/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_tuits_by_user(client: &Client, base: &str, uid: &str) -> Result<Vec<Tuit>> {
        Ok(client
            .get(format!("{base}/users/{uid}/tuits"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn create_tuit(client: &Client, base: &str, tuit: &NewTuit) -> Result<Tuit> {
        Ok(client
            .post(format!("{base}/tuits"))
            .json(tuit)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn update_tuit(
        client: &Client,
        base: &str,
        tid: &str,
        update: &UpdateTuit,
    ) -> Result<UpdateStatus> {
        Ok(client
            .put(format!("{base}/tuits/{tid}"))
            .json(update)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn delete_tuit(client: &Client, base: &str, tid: &str) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/tuits/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn find_following(client: &Client, base: &str, uid: &str) -> Result<Vec<Follow>> {
        Ok(client
            .get(format!("{base}/users/{uid}/following"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_followers(client: &Client, base: &str, uid: &str) -> Result<Vec<Follow>> {
        Ok(client
            .get(format!("{base}/users/{uid}/followers"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_follows_user(
        client: &Client,
        base: &str,
        uid1: &str,
        uid2: &str,
    ) -> Result<Follow> {
        Ok(client
            .post(format!("{base}/users/{uid1}/follows/{uid2}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_unfollows_user(
        client: &Client,
        base: &str,
        uid1: &str,
        uid2: &str,
    ) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/users/{uid1}/follows/{uid2}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn check_following(
        client: &Client,
        base: &str,
        uid1: &str,
        uid2: &str,
    ) -> Result<bool> {
        Ok(client
            .get(format!("{base}/users/{uid1}/following/{uid2}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn check_follower(
        client: &Client,
        base: &str,
        uid1: &str,
        uid2: &str,
    ) -> Result<bool> {
        Ok(client
            .get(format!("{base}/users/{uid1}/follower/{uid2}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn find_users_that_liked_tuit(
        client: &Client,
        base: &str,
        tid: &str,
    ) -> Result<Vec<Like>> {
        Ok(client
            .get(format!("{base}/tuits/{tid}/likes"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_tuits_liked_by_user(
        client: &Client,
        base: &str,
        uid: &str,
    ) -> Result<Vec<Like>> {
        Ok(client
            .get(format!("{base}/users/{uid}/likes"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_user_likes_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<Option<Like>> {
        Ok(client
            .get(format!("{base}/users/{uid}/likes/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn count_likes_for_tuit(client: &Client, base: &str, tid: &str) -> Result<u64> {
        Ok(client
            .get(format!("{base}/tuits/{tid}/likes/count"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_likes_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<Like> {
        Ok(client
            .post(format!("{base}/users/{uid}/likes/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_unlikes_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/users/{uid}/unlikes/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn find_users_that_disliked_tuit(
        client: &Client,
        base: &str,
        tid: &str,
    ) -> Result<Vec<Dislike>> {
        Ok(client
            .get(format!("{base}/tuits/{tid}/dislikes"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_tuits_disliked_by_user(
        client: &Client,
        base: &str,
        uid: &str,
    ) -> Result<Vec<Dislike>> {
        Ok(client
            .get(format!("{base}/users/{uid}/dislikes"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_user_dislikes_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<Option<Dislike>> {
        Ok(client
            .get(format!("{base}/users/{uid}/dislikes/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn count_dislikes_for_tuit(client: &Client, base: &str, tid: &str) -> Result<u64> {
        Ok(client
            .get(format!("{base}/tuits/{tid}/dislikes/count"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_dislikes_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<Dislike> {
        Ok(client
            .post(format!("{base}/users/{uid}/dislikes/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_undislikes_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/users/{uid}/undislikes/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn find_tuits_bookmarked_by_user(
        client: &Client,
        base: &str,
        uid: &str,
    ) -> Result<Vec<Bookmark>> {
        Ok(client
            .get(format!("{base}/users/{uid}/bookmarks"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn check_tuit_bookmarked_by_user(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<bool> {
        Ok(client
            .get(format!("{base}/users/{uid}/bookmarks/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_bookmarks_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<Bookmark> {
        Ok(client
            .post(format!("{base}/users/{uid}/bookmarks/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn user_unbookmarks_tuit(
        client: &Client,
        base: &str,
        uid: &str,
        tid: &str,
    ) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/users/{uid}/unbookmarks/{tid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn delete_all_bookmarks_for_user(
        client: &Client,
        base: &str,
        uid: &str,
    ) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/users/{uid}/bookmarks"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn find_messages_sent(
        client: &Client,
        base: &str,
        uid: &str,
    ) -> Result<Vec<Message>> {
        Ok(client
            .get(format!("{base}/messages/sent/{uid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn find_messages_received(
        client: &Client,
        base: &str,
        uid: &str,
    ) -> Result<Vec<Message>> {
        Ok(client
            .get(format!("{base}/messages/received/{uid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn send_message(
        client: &Client,
        base: &str,
        from: &str,
        to: &str,
        message: &NewMessage,
    ) -> Result<Message> {
        Ok(client
            .post(format!("{base}/users/{from}/sends/{to}"))
            .json(message)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn delete_message(client: &Client, base: &str, mid: &str) -> Result<DeleteStatus> {
        Ok(client
            .delete(format!("{base}/message/{mid}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn messages_received_from(
        client: &Client,
        base: &str,
        to: &str,
        from: &str,
    ) -> Result<Vec<Message>> {
        Ok(client
            .get(format!("{base}/messages/{to}/received/{from}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn messages_sent_to(
        client: &Client,
        base: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<Message>> {
        Ok(client
            .get(format!("{base}/messages/{from}/sent/{to}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn signup(client: &Client, base: &str, user: &NewUser) -> Result<User> {
        Ok(client
            .post(format!("{base}/api/auth/signup"))
            .json(user)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn login(client: &Client, base: &str, credentials: &Credentials) -> Result<User> {
        Ok(client
            .post(format!("{base}/api/auth/login"))
            .json(credentials)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn profile(client: &Client, base: &str) -> Result<User> {
        Ok(client
            .post(format!("{base}/api/auth/profile"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
    pub async fn logout(client: &Client, base: &str) -> Result<()> {
        client
            .post(format!("{base}/api/auth/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod live {
    use std::process::{Child, Command};
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use reqwest::Client;
    use tuiter_common::{Credentials, NewMessage, NewTuit, NewUser};

    use crate::client::*;

    const PORT: u16 = 4123;

    struct ServerRunner(Child);

    impl ServerRunner {
        fn spawn() -> Self {
            let server = Command::new("cargo")
                .arg("run")
                .arg("-p")
                .arg("tuiter-server")
                .env("TUITER_PORT", PORT.to_string())
                .spawn()
                .unwrap();
            thread::sleep(Duration::from_secs(5));
            Self(server)
        }
    }

    impl Drop for ServerRunner {
        fn drop(&mut self) {
            self.0.kill().unwrap();
        }
    }

    fn unique(name: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        format!("{name}-{millis}")
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: String::from("hunter2"),
            ..NewUser::default()
        }
    }

    #[test]
    #[ignore = "requires cargo and a MongoDB instance reachable via MONGO_URI"]
    fn exercises_the_whole_surface() {
        let _server = ServerRunner::spawn();
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(actual_test())
            .unwrap();
    }

    async fn actual_test() -> anyhow::Result<()> {
        let client = Client::builder().cookie_store(true).build()?;
        let base = format!("http://localhost:{PORT}");
        let base = base.as_str();

        let alice_name = unique("alice");
        let alice = signup(&client, base, &new_user(&alice_name)).await?;
        assert_eq!(alice.password, "");
        let bob = create_user(&client, base, &new_user(&unique("bob"))).await?;

        // Duplicate signup leaves the existing record alone.
        assert!(signup(&client, base, &new_user(&alice_name)).await.is_err());
        assert_eq!(
            find_user_by_id(&client, base, &alice.id)
                .await?
                .unwrap()
                .username,
            alice_name
        );

        // Follow edges show up from both ends.
        user_follows_user(&client, base, &alice.id, &bob.id).await?;
        let following = find_following(&client, base, &alice.id).await?;
        assert!(following
            .iter()
            .any(|f| f.user_followed.doc().map(|u| u.id.as_str()) == Some(bob.id.as_str())));
        let followers = find_followers(&client, base, &bob.id).await?;
        assert!(followers
            .iter()
            .any(|f| f.user_following.doc().map(|u| u.id.as_str()) == Some(alice.id.as_str())));
        assert!(check_following(&client, base, &alice.id, &bob.id).await?);
        assert!(check_follower(&client, base, &bob.id, &alice.id).await?);

        // Nothing stops a duplicate edge; both inserts land.
        user_follows_user(&client, base, &alice.id, &bob.id).await?;
        let edges = find_following(&client, base, &alice.id)
            .await?
            .into_iter()
            .filter(|f| f.user_followed.doc().map(|u| u.id.as_str()) == Some(bob.id.as_str()))
            .count();
        assert_eq!(edges, 2);
        user_unfollows_user(&client, base, &alice.id, &bob.id).await?;
        user_unfollows_user(&client, base, &alice.id, &bob.id).await?;

        // Delete-after-create removes a single edge cleanly.
        user_follows_user(&client, base, &bob.id, &alice.id).await?;
        assert!(check_following(&client, base, &bob.id, &alice.id).await?);
        user_unfollows_user(&client, base, &bob.id, &alice.id).await?;
        assert!(!check_following(&client, base, &bob.id, &alice.id).await?);

        // Dislike count tracks surviving records.
        let tuit = create_tuit(
            &client,
            base,
            &NewTuit {
                tuit: String::from("first!"),
                posted_by: alice.id.clone(),
                posted_on: None,
            },
        )
        .await?;
        user_dislikes_tuit(&client, base, &alice.id, &tuit.id).await?;
        user_dislikes_tuit(&client, base, &bob.id, &tuit.id).await?;
        assert_eq!(count_dislikes_for_tuit(&client, base, &tuit.id).await?, 2);
        user_undislikes_tuit(&client, base, &bob.id, &tuit.id).await?;
        assert_eq!(count_dislikes_for_tuit(&client, base, &tuit.id).await?, 1);
        assert!(
            find_user_dislikes_tuit(&client, base, &alice.id, &tuit.id)
                .await?
                .is_some(),
            "alice's dislike should survive"
        );

        // Likes mirror the same shape.
        user_likes_tuit(&client, base, &bob.id, &tuit.id).await?;
        assert_eq!(count_likes_for_tuit(&client, base, &tuit.id).await?, 1);
        assert_eq!(find_users_that_liked_tuit(&client, base, &tuit.id).await?.len(), 1);
        user_unlikes_tuit(&client, base, &bob.id, &tuit.id).await?;
        assert_eq!(count_likes_for_tuit(&client, base, &tuit.id).await?, 0);

        // Bookmarks.
        user_bookmarks_tuit(&client, base, &bob.id, &tuit.id).await?;
        assert!(check_tuit_bookmarked_by_user(&client, base, &bob.id, &tuit.id).await?);
        assert_eq!(
            find_tuits_bookmarked_by_user(&client, base, &bob.id).await?.len(),
            1
        );
        delete_all_bookmarks_for_user(&client, base, &bob.id).await?;
        assert!(!check_tuit_bookmarked_by_user(&client, base, &bob.id, &tuit.id).await?);

        // Messages.
        let message = send_message(
            &client,
            base,
            &alice.id,
            &bob.id,
            &NewMessage {
                message: String::from("hey bob"),
                sent_on: None,
            },
        )
        .await?;
        assert!(!find_messages_sent(&client, base, &alice.id).await?.is_empty());
        assert!(!messages_received_from(&client, base, &bob.id, &alice.id)
            .await?
            .is_empty());
        delete_message(&client, base, &message.id).await?;

        // Session lifecycle.
        login(
            &client,
            base,
            &Credentials {
                username: alice_name.clone(),
                password: String::from("hunter2"),
            },
        )
        .await?;
        let me = profile(&client, base).await?;
        assert_eq!(me.username, alice_name);
        assert_eq!(me.password, "");
        logout(&client, base).await?;
        assert!(profile(&client, base).await.is_err());

        Ok(())
    }
}

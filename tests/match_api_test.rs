//! End-to-end tests for the match and standings API.

use reqwest::Client;
use serde_json::json;

use football_results_backend::config::settings::AggregationSettings;

mod common;
use common::utils::{spawn_app, spawn_app_with_settings};

fn match_body(team_a: &str, team_b: &str, team_a_goals: i64, team_b_goals: i64) -> serde_json::Value {
    json!({
        "match_date": "01/03/2025",
        "city": "Manchester",
        "team_a": team_a,
        "team_b": team_b,
        "team_a_goals": team_a_goals,
        "team_b_goals": team_b_goals
    })
}

async fn post_match(
    client: &Client,
    address: &str,
    body: &serde_json::Value,
) -> serde_json::Value {
    let response = client
        .post(format!("{}/matches", address))
        .json(body)
        .send()
        .await
        .expect("Failed to post match");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse response")
}

async fn team_standing(client: &Client, address: &str, team: &str) -> serde_json::Value {
    let response = client
        .get(format!("{}/standings/{}", address, team))
        .send()
        .await
        .expect("Failed to fetch standing");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"].clone()
}

#[tokio::test]
async fn recording_a_match_creates_both_standings() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let created = post_match(&client, &test_app.address, &match_body("Alpha", "Beta", 2, 0)).await;
    assert_eq!(created["success"], true);
    assert!(created["data"]["match_id"].as_i64().unwrap() > 0);

    let alpha = team_standing(&client, &test_app.address, "Alpha").await;
    assert_eq!(alpha["matches_played"], 1);
    assert_eq!(alpha["wins"], 1);
    assert_eq!(alpha["draws"], 0);
    assert_eq!(alpha["losses"], 0);
    assert_eq!(alpha["goals_scored"], 2);
    assert_eq!(alpha["goals_against"], 0);
    assert_eq!(alpha["points"], 3);

    let beta = team_standing(&client, &test_app.address, "Beta").await;
    assert_eq!(beta["matches_played"], 1);
    assert_eq!(beta["losses"], 1);
    assert_eq!(beta["goals_against"], 2);
    assert_eq!(beta["points"], 0);
}

#[tokio::test]
async fn invalid_match_requests_are_rejected() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let same_teams = match_body("Alpha", "alpha", 1, 0);
    let bad_date = {
        let mut body = match_body("Alpha", "Beta", 1, 0);
        body["match_date"] = json!("2025-03-01");
        body
    };
    let negative_goals = match_body("Alpha", "Beta", -1, 0);

    for body in [same_teams, bad_date, negative_goals] {
        let response = client
            .post(format!("{}/matches", &test_app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to post match");
        assert_eq!(response.status().as_u16(), 400, "body: {}", body);
    }

    // Nothing reached the stores.
    let response = client
        .get(format!("{}/matches", &test_app.address))
        .send()
        .await
        .expect("Failed to list matches");
    let listing: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(listing["total_count"], 0);
}

#[tokio::test]
async fn matches_can_be_listed_and_filtered_by_team() {
    let test_app = spawn_app().await;
    let client = Client::new();

    post_match(&client, &test_app.address, &match_body("Alpha", "Beta", 2, 0)).await;
    post_match(&client, &test_app.address, &match_body("Beta", "Gamma", 1, 1)).await;
    post_match(&client, &test_app.address, &match_body("Gamma", "Alpha", 0, 3)).await;

    let all: serde_json::Value = client
        .get(format!("{}/matches", &test_app.address))
        .send()
        .await
        .expect("Failed to list matches")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(all["total_count"], 3);

    let beta_only: serde_json::Value = client
        .get(format!("{}/matches?team=Beta", &test_app.address))
        .send()
        .await
        .expect("Failed to list matches")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(beta_only["total_count"], 2);
    for record in beta_only["data"].as_array().unwrap() {
        assert!(record["team_a"] == "Beta" || record["team_b"] == "Beta");
    }
}

#[tokio::test]
async fn editing_a_match_reconciles_standings() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let created = post_match(&client, &test_app.address, &match_body("Alpha", "Beta", 2, 0)).await;
    let match_id = created["data"]["match_id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/matches/{}", &test_app.address, match_id))
        .json(&match_body("Alpha", "Beta", 1, 1))
        .send()
        .await
        .expect("Failed to edit match");
    assert!(response.status().is_success());

    let alpha = team_standing(&client, &test_app.address, "Alpha").await;
    assert_eq!(alpha["wins"], 0);
    assert_eq!(alpha["draws"], 1);
    assert_eq!(alpha["points"], 1);

    let beta = team_standing(&client, &test_app.address, "Beta").await;
    assert_eq!(beta["losses"], 0);
    assert_eq!(beta["draws"], 1);
    assert_eq!(beta["points"], 1);
}

#[tokio::test]
async fn editing_an_unknown_match_returns_404() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/matches/9999", &test_app.address))
        .json(&match_body("Alpha", "Beta", 1, 1))
        .send()
        .await
        .expect("Failed to send edit");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn deleting_a_match_retracts_its_contribution() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let created = post_match(&client, &test_app.address, &match_body("Alpha", "Beta", 3, 1)).await;
    let match_id = created["data"]["match_id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/matches/{}", &test_app.address, match_id))
        .send()
        .await
        .expect("Failed to delete match");
    assert!(response.status().is_success());

    // The match is gone and both teams are back at zero.
    let response = client
        .get(format!("{}/matches/{}", &test_app.address, match_id))
        .send()
        .await
        .expect("Failed to fetch match");
    assert_eq!(response.status().as_u16(), 404);

    let alpha = team_standing(&client, &test_app.address, "Alpha").await;
    assert_eq!(alpha["matches_played"], 0);
    assert_eq!(alpha["points"], 0);
}

#[tokio::test]
async fn drop_zeroed_teams_removes_reverted_standings() {
    let test_app = spawn_app_with_settings(AggregationSettings {
        drop_zeroed_teams: true,
    })
    .await;
    let client = Client::new();

    let created = post_match(&client, &test_app.address, &match_body("Alpha", "Beta", 1, 1)).await;
    let match_id = created["data"]["match_id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/matches/{}", &test_app.address, match_id))
        .send()
        .await
        .expect("Failed to delete match");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/standings/Alpha", &test_app.address))
        .send()
        .await
        .expect("Failed to fetch standing");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn standings_are_sorted_by_points() {
    let test_app = spawn_app().await;
    let client = Client::new();

    post_match(&client, &test_app.address, &match_body("Alpha", "Beta", 2, 0)).await;
    post_match(&client, &test_app.address, &match_body("Alpha", "Gamma", 1, 0)).await;
    post_match(&client, &test_app.address, &match_body("Beta", "Gamma", 2, 2)).await;

    let table: serde_json::Value = client
        .get(format!("{}/standings", &test_app.address))
        .send()
        .await
        .expect("Failed to fetch standings")
        .json()
        .await
        .expect("Failed to parse response");
    let rows = table["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["team_name"], "Alpha");
    assert_eq!(rows[0]["points"], 6);
    let points: Vec<i64> = rows.iter().map(|r| r["points"].as_i64().unwrap()).collect();
    assert!(points.windows(2).all(|pair| pair[0] >= pair[1]));

    let ascending: serde_json::Value = client
        .get(format!("{}/standings?ascending=true", &test_app.address))
        .send()
        .await
        .expect("Failed to fetch standings")
        .json()
        .await
        .expect("Failed to parse response");
    let rows = ascending["data"].as_array().unwrap();
    let points: Vec<i64> = rows.iter().map(|r| r["points"].as_i64().unwrap()).collect();
    assert!(points.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn unknown_team_standing_returns_404() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/standings/Nobody", &test_app.address))
        .send()
        .await
        .expect("Failed to fetch standing");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn recalculation_reproduces_incremental_standings() {
    let test_app = spawn_app().await;
    let client = Client::new();

    post_match(&client, &test_app.address, &match_body("Alpha", "Beta", 2, 0)).await;
    post_match(&client, &test_app.address, &match_body("Beta", "Gamma", 1, 1)).await;
    post_match(&client, &test_app.address, &match_body("Gamma", "Alpha", 3, 2)).await;

    let before: serde_json::Value = client
        .get(format!("{}/standings", &test_app.address))
        .send()
        .await
        .expect("Failed to fetch standings")
        .json()
        .await
        .expect("Failed to parse response");

    let response = client
        .post(format!("{}/standings/recalculate", &test_app.address))
        .send()
        .await
        .expect("Failed to recalculate");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["matches_applied"], 3);

    let after: serde_json::Value = client
        .get(format!("{}/standings", &test_app.address))
        .send()
        .await
        .expect("Failed to fetch standings")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(after["data"], before["data"]);
}

#[tokio::test]
async fn backend_health_works() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/backend_health", &test_app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());
}

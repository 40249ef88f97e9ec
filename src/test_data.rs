//! The sample dataset loaded by `generate-test-data`.

use serde_json::{json, Value};

/// Sixteen persons: directors, actors, and the agents of some of them.
pub fn persons() -> Vec<Value> {
    vec![
        json!({ "personId": 1, "name": "Stephen Frears", "role": ["director"] }),
        json!({ "personId": 2, "name": "George Lucas", "role": ["director"] }),
        json!({ "personId": 3, "name": "Quentin Tarantino", "role": ["director", "actor"] }),
        json!({ "personId": 4, "name": "Uma Thurman", "role": ["actor"], "agent": "15" }),
        json!({ "personId": 5, "name": "John Travolta", "role": ["actor"] }),
        json!({ "personId": 6, "name": "Ewan McGregor", "role": ["actor"] }),
        json!({ "personId": 7, "name": "Natalie Portman", "role": ["actor"] }),
        json!({ "personId": 8, "name": "Keanu Reeves", "role": ["actor"], "agent": "16" }),
        json!({ "personId": 9, "name": "Russell Crowe", "role": ["director", "actor"], "agent": "16" }),
        json!({ "personId": 10, "name": "Seth MacFarlane", "role": ["actor"] }),
        json!({ "personId": 11, "name": "Naomi Watts", "role": ["actor"] }),
        json!({ "personId": 12, "name": "Ed Harris", "role": ["actor"] }),
        json!({ "personId": 13, "name": "Marc Forster", "role": ["director"] }),
        json!({ "personId": 14, "name": "John Forbes Nash", "role": ["actor"] }),
        json!({ "personId": 15, "name": "John Doe", "role": ["actor"] }),
        json!({ "personId": 16, "name": "Jane Doe", "role": ["actor"] }),
    ]
}

/// Six movies, one of them a TV series episode and one a biography.
/// Every reference points into [`persons`].
pub fn movies() -> Vec<Value> {
    vec![
        json!({
            "movieId": "1",
            "title": "Pulp Fiction",
            "releaseDate": "1994-05-12",
            "director": "3",
            "actors": "3, 5, 6",
        }),
        json!({
            "movieId": "2",
            "title": "Star Wars",
            "releaseDate": "1977-05-25",
            "director": "2",
            "actors": "7, 8",
        }),
        json!({
            "movieId": "3",
            "title": "Dangerous Liaisons",
            "releaseDate": "1988-12-16",
            "director": "1",
            "actors": "8, 4",
        }),
        json!({
            "movieId": "4",
            "title": "2015",
            "releaseDate": "2019-06-30",
            "director": "1",
            "actors": "9, 10, 11",
            "category": "tvSeriesEpisode",
            "tvSeriesName": "The Loudest Voice",
            "episodeNo": "6",
        }),
        json!({
            "movieId": "5",
            "title": "A Beautiful Mind",
            "releaseDate": "2001-12-21",
            "director": "9",
            "actors": "9, 12",
            "category": "biography",
            "about": "14",
        }),
        json!({
            "movieId": "6",
            "title": "Stay",
            "releaseDate": "2005-09-24",
            "director": "13",
            "actors": "6, 11",
        }),
    ]
}

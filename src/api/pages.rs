use std::{fmt::Write, sync::Arc};

use axum::{
    Extension,
    extract::{Path, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::playlist::{ArtistListQuery, error_status};
use crate::{
    management,
    server::AppState,
    types::{ArtistInfo, ContentInfo, ContentType, PlaylistInfo},
    utils::{escape_html, find_artist_by_slug, format_percentage},
    warning,
};

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body
    )
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<main><h1>{}</h1><p>{}</p><p><a href=\"/\">Back</a></p></main>",
        status.as_u16(),
        escape_html(message)
    );
    (status, Html(layout("Playlist Insights", &body))).into_response()
}

pub async fn index(Query(query): Query<IndexQuery>) -> Html<String> {
    let banner = match query.error.as_deref() {
        Some("invalid-url") => {
            "<p role=\"alert\">That does not look like a Spotify playlist URL.</p>\n"
        }
        Some(_) => "<p role=\"alert\">Something went wrong.</p>\n",
        None => "",
    };

    let body = format!(
        "<main>\n<h1>Playlist Insights</h1>\n{banner}\
         <form method=\"post\" action=\"/api/validate-playlist\">\n\
         <input type=\"text\" name=\"playlistUrl\" placeholder=\"https://open.spotify.com/playlist/...\" required>\n\
         <button type=\"submit\">Analyze</button>\n</form>\n</main>"
    );
    Html(layout("Playlist Insights", &body))
}

pub async fn playlist_page(
    Path(playlist_id): Path<String>,
    Query(query): Query<ArtistListQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    match management::get_playlist_info(&state.spotify, &playlist_id).await {
        Ok(mut info) => {
            query.apply(&mut info.artists);
            Html(layout(&info.name, &render_playlist(&playlist_id, &info, &query))).into_response()
        }
        Err(e) => {
            warning!("Failed to render playlist {}: {}", playlist_id, e);
            error_page(error_status(&e), "The playlist could not be loaded.")
        }
    }
}

pub async fn artist_page(
    Path((playlist_id, artist_slug)): Path<(String, String)>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let info = match management::get_playlist_info(&state.spotify, &playlist_id).await {
        Ok(info) => info,
        Err(e) => {
            warning!("Failed to render artist page for {}: {}", playlist_id, e);
            return error_page(error_status(&e), "The playlist could not be loaded.");
        }
    };

    let Some(artist) = find_artist_by_slug(&info.artists, &artist_slug) else {
        return error_page(StatusCode::NOT_FOUND, "No such artist in this playlist.");
    };

    let image_url = if artist.image_url.is_empty() {
        String::new()
    } else {
        state.background.remove_background(&artist.image_url).await
    };

    Html(layout(
        &artist.name,
        &render_artist(&playlist_id, &info, artist, &image_url),
    ))
    .into_response()
}

fn render_playlist(playlist_id: &str, info: &PlaylistInfo, query: &ArtistListQuery) -> String {
    let mut html = String::from("<main>\n<header>\n");
    if !info.image.is_empty() {
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"\" width=\"160\" height=\"160\">",
            escape_html(&info.image)
        );
    }
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&info.name));
    if !info.description.is_empty() {
        let _ = writeln!(html, "<p>{}</p>", escape_html(&info.description));
    }
    let _ = writeln!(
        html,
        "<p>By <a href=\"{}\">{}</a> · {} followers · {} items</p>\n</header>",
        escape_html(&info.owner.url),
        escape_html(&info.owner.name),
        info.followers,
        info.total_items
    );

    let breakdown = &info.content_breakdown;
    let _ = writeln!(
        html,
        "<section id=\"breakdown\"><p>{} tracks · {} episodes · {} other</p></section>",
        breakdown.tracks, breakdown.episodes, breakdown.other
    );

    let base = format!("/playlist/{}", urlencoding::encode(playlist_id));
    let toggled = query.order().toggled();
    let _ = writeln!(
        html,
        "<section id=\"artists\">\n\
         <form method=\"get\" action=\"{base}\">\
         <input type=\"search\" name=\"search\" value=\"{search}\" placeholder=\"Search artists...\">\
         <input type=\"hidden\" name=\"order\" value=\"{order}\">\
         <button type=\"submit\">Search</button></form>\n\
         <a href=\"{base}?order={toggled}&amp;search={search_param}\">Sort {toggled}</a>",
        base = base,
        search = escape_html(query.search()),
        order = query.order().as_str(),
        toggled = toggled.as_str(),
        search_param = urlencoding::encode(query.search()),
    );

    if info.artists.is_empty() {
        html.push_str("<p>No artists found.</p>\n");
    } else {
        html.push_str("<ol>\n");
        for artist in &info.artists {
            render_artist_row(&mut html, &base, artist);
        }
        html.push_str("</ol>\n");
    }

    html.push_str("</section>\n</main>");
    html
}

fn render_artist_row(html: &mut String, base: &str, artist: &ArtistInfo) {
    let _ = write!(
        html,
        "<li><a href=\"{base}/artist/{slug}\">",
        slug = urlencoding::encode(&artist.name.to_lowercase())
    );
    if !artist.image_url.is_empty() {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"\" width=\"40\" height=\"40\"> ",
            escape_html(&artist.image_url)
        );
    }
    let _ = writeln!(
        html,
        "{name}</a> <span>{share}</span> <small>{count} items · {followers} followers</small></li>",
        name = escape_html(&artist.name),
        share = format_percentage(artist.percentage),
        count = artist.content_count,
        followers = artist.followers
    );
}

fn render_artist(
    playlist_id: &str,
    info: &PlaylistInfo,
    artist: &ArtistInfo,
    image_url: &str,
) -> String {
    let mut html = String::from("<main>\n<header>\n");
    let _ = writeln!(
        html,
        "<p><a href=\"/playlist/{}\">{}</a></p>",
        urlencoding::encode(playlist_id),
        escape_html(&info.name)
    );
    if !image_url.is_empty() {
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"\" width=\"240\">",
            escape_html(image_url)
        );
    }
    let _ = writeln!(
        html,
        "<h1>{}</h1>\n<p>{} of the playlist · {} items · {} followers</p>\n</header>",
        escape_html(&artist.name),
        format_percentage(artist.percentage),
        artist.content_count,
        artist.followers
    );

    html.push_str("<ul>\n");
    for content in &artist.content {
        render_content_row(&mut html, content);
    }
    html.push_str("</ul>\n</main>");
    html
}

fn render_content_row(html: &mut String, content: &ContentInfo) {
    let kind = match content.kind {
        ContentType::Track => "track",
        ContentType::Episode => "episode",
        ContentType::Other => "other",
    };

    html.push_str("<li>");
    if !content.image_url.is_empty() {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"\" width=\"48\" height=\"48\"> ",
            escape_html(&content.image_url)
        );
    }
    let _ = write!(
        html,
        "<strong>{}</strong> <em>{}</em> {} <span>{}</span>",
        escape_html(&content.name),
        kind,
        escape_html(&content.artists.join(", ")),
        format_percentage(content.percentage)
    );
    if !content.preview_url.is_empty() {
        let _ = write!(
            html,
            " <audio controls preload=\"none\" src=\"{}\"></audio>",
            escape_html(&content.preview_url)
        );
    }
    html.push_str("</li>\n");
}

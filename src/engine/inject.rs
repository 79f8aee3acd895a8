//! engine::inject
//!
//! Course URL injection.
//!
//! Content generators write `{{COURSEURL}}` wherever a route or asset link
//! needs the course's identity. Routes and videos are course-relative and
//! take the course id; images and PDFs are fetched from the course host and
//! take the course URL.
//!
//! Every pass injects from the authored links kept on each node, never
//! from the result of a previous pass.

use crate::core::course::Course;

/// Placeholder written by content generators.
pub const COURSE_URL_PLACEHOLDER: &str = "{{COURSEURL}}";

/// Hosts that serve published courses. The first is the default.
pub const COURSE_HOSTS: [&str; 2] = [".netlify.app", ".tutors.dev"];

/// Fill in whichever half of the course identity is missing.
///
/// - An id that is really a hosted URL becomes the URL, and the id is its
///   first label
/// - A bare id with no URL is served from the default host
/// - A hosted URL with no id yields the id from its first label
///
/// Empty strings count as absent.
///
/// ```
/// use tutorweave::engine::resolve_course_identity;
///
/// let (id, url) = resolve_course_identity(Some("oop"), None);
/// assert_eq!(id.as_deref(), Some("oop"));
/// assert_eq!(url.as_deref(), Some("oop.netlify.app"));
///
/// let (id, url) = resolve_course_identity(Some("oop.tutors.dev"), None);
/// assert_eq!(id.as_deref(), Some("oop"));
/// assert_eq!(url.as_deref(), Some("oop.tutors.dev"));
/// ```
pub fn resolve_course_identity(
    course_id: Option<&str>,
    course_url: Option<&str>,
) -> (Option<String>, Option<String>) {
    let course_id = course_id.filter(|id| !id.is_empty());
    let course_url = course_url.filter(|url| !url.is_empty());

    match (course_id, course_url) {
        (Some(id), url) if is_hosted(id) => {
            (Some(first_label(id)), Some(url.unwrap_or(id).to_string()))
        }
        (Some(id), None) => (Some(id.to_string()), Some(format!("{id}{}", COURSE_HOSTS[0]))),
        (None, Some(url)) if is_hosted(url) => (Some(first_label(url)), Some(url.to_string())),
        (id, url) => (id.map(str::to_string), url.map(str::to_string)),
    }
}

fn is_hosted(text: &str) -> bool {
    COURSE_HOSTS.iter().any(|host| text.contains(host))
}

fn first_label(host: &str) -> String {
    let host = host.split_once("://").map_or(host, |(_, rest)| rest);
    host.split('.').next().unwrap_or(host).to_string()
}

/// Replace the placeholder in every node of the course.
///
/// Runs after decoration and before indexing, so the index is keyed by the
/// final routes.
pub fn inject_course_url(course: &mut Course) {
    let course_id = course.course_id.clone();
    let course_url = course.course_url.clone();

    for lo in course.nodes_mut() {
        lo.route = lo.authored.route.clone();
        lo.route.replace(COURSE_URL_PLACEHOLDER, &course_id);
        lo.video = injected(lo.authored.video.as_deref(), &course_id);
        lo.img = injected(lo.authored.img.as_deref(), &course_url);
        lo.pdf = injected(lo.authored.pdf.as_deref(), &course_url);
    }
}

fn injected(template: Option<&str>, value: &str) -> Option<String> {
    template.map(|text| text.replace(COURSE_URL_PLACEHOLDER, value))
}

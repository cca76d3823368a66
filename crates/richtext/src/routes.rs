/// Builds the paths views link to.
pub trait Routes: Send + Sync {
    fn post_url(&self, author_id: &str, post_id: &str) -> String;
    fn profile_url(&self, username: &str) -> String;
    fn stack_url(&self, title: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRoutes;

impl Routes for DefaultRoutes {
    fn post_url(&self, author_id: &str, post_id: &str) -> String {
        format!(
            "/post/{}/{}",
            encode_uri_component(author_id),
            encode_uri_component(post_id)
        )
    }

    fn profile_url(&self, username: &str) -> String {
        format!("/profile/{}", encode_uri_component(username))
    }

    fn stack_url(&self, title: &str) -> String {
        format!("/stack/{}", encode_uri_component(title))
    }
}

/// Percent-encodes everything except the characters JavaScript's
/// `encodeURIComponent` leaves alone.
pub fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_and_non_ascii_bytes() {
        assert_eq!(encode_uri_component("a b/c?"), "a%20b%2Fc%3F");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
        assert_eq!(encode_uri_component("it's (ok)!"), "it's%20(ok)!");
    }

    #[test]
    fn default_routes_encode_each_segment() {
        let routes = DefaultRoutes;
        assert_eq!(routes.post_url("u 1", "p/2"), "/post/u%201/p%2F2");
        assert_eq!(routes.profile_url("ada"), "/profile/ada");
        assert_eq!(routes.stack_url("My Stack"), "/stack/My%20Stack");
    }
}

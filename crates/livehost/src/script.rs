//! Client reload scripts and root-document injection.

/// Script that polls `address` every `interval_ms` and reloads on anything
/// other than a 200 response, including network failures.
pub fn pull_script(address: &str, interval_ms: u64) -> String {
    format!(
        "<script>(function(){{var u=\"{address}\";setInterval(function(){{\
fetch(u,{{cache:\"no-store\"}}).then(function(r){{if(r.status!==200)location.reload();}},\
function(){{location.reload();}});}},{interval_ms});}})();</script>"
    )
}

/// Script that holds a WebSocket open to `endpoint` and reloads on any
/// message. After the socket drops it keeps retrying and reloads once the
/// server answers again.
pub fn push_script(endpoint: &str) -> String {
    format!(
        "<script>(function(){{var p=(location.protocol===\"https:\"?\"wss://\":\"ws://\")+location.host+\"{endpoint}\";\
function c(r){{var s=new WebSocket(p);s.onopen=function(){{if(r)location.reload();}};\
s.onmessage=function(){{location.reload();}};\
s.onclose=function(){{setTimeout(function(){{c(true);}},1000);}};}}c(false);}})();</script>"
    )
}

const BODY_CLOSE: &[u8] = b"</body>";

/// Insert `script` immediately before the first `</body>` (any case).
///
/// Bytes on either side are copied unchanged. Documents without a closing
/// body tag get the script appended.
pub fn inject_script(document: &[u8], script: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(document.len() + script.len());
    match find_ignore_ascii_case(document, BODY_CLOSE) {
        Some(pos) => {
            out.extend_from_slice(&document[..pos]);
            out.extend_from_slice(script.as_bytes());
            out.extend_from_slice(&document[pos..]);
        }
        None => {
            out.extend_from_slice(document);
            out.extend_from_slice(script.as_bytes());
        }
    }
    out
}

fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

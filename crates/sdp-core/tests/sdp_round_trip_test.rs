//! Parse/write and accessor behaviour on browser-shaped descriptions

use pretty_assertions::assert_eq;
use rconf_sdp_core::util::prefer_video_codec;
use rconf_sdp_core::{MediaDirection, MediaType, SessionDescription, SsrcGroup, SsrcRecord};

const FIREFOX_LIKE: &str = "v=0\r\n\
o=mozilla...THIS_IS_SDPARTA-99.0 7650617093695834473 0 IN IP4 0.0.0.0\r\n\
s=-\r\n\
t=0 0\r\n\
a=fingerprint:sha-256 4D:3A:3F:7E:12:AB\r\n\
a=group:BUNDLE 0 1\r\n\
a=ice-options:trickle\r\n\
a=msid-semantic:WMS *\r\n\
m=audio 9 UDP/TLS/RTP/SAVPF 109 9 0 8 101\r\n\
c=IN IP4 0.0.0.0\r\n\
a=sendrecv\r\n\
a=extmap:1 urn:ietf:params:rtp-hdrext:ssrc-audio-level\r\n\
a=fmtp:109 maxplaybackrate=48000;stereo=1;useinbandfec=1\r\n\
a=fmtp:101 0-15\r\n\
a=ice-pwd:ff7b10a7f4c0f2c7cd5e1e9f8ba5a2a1\r\n\
a=ice-ufrag:3a2b4c5d\r\n\
a=mid:0\r\n\
a=rtcp-mux\r\n\
a=rtpmap:109 opus/48000/2\r\n\
a=rtpmap:9 G722/8000/1\r\n\
a=rtpmap:0 PCMU/8000\r\n\
a=rtpmap:8 PCMA/8000\r\n\
a=rtpmap:101 telephone-event/8000\r\n\
a=setup:actpass\r\n\
a=ssrc:2655508255 cname:{6a2c5e0c-02b1-4a4e-b8fb-1d6c2b3f1c5e}\r\n\
m=video 9 UDP/TLS/RTP/SAVPF 120 124 121 125 126 127 97 98\r\n\
c=IN IP4 0.0.0.0\r\n\
a=sendonly\r\n\
a=fmtp:126 profile-level-id=42e01f;level-asymmetry-allowed=1;packetization-mode=1\r\n\
a=fmtp:124 apt=120\r\n\
a=mid:1\r\n\
a=rtcp-fb:120 nack\r\n\
a=rtcp-fb:120 nack pli\r\n\
a=rtcp-fb:120 ccm fir\r\n\
a=rtpmap:120 VP8/90000\r\n\
a=rtpmap:124 rtx/90000\r\n\
a=rtpmap:126 H264/90000\r\n\
a=ssrc-group:FID 3335134180 1617180245\r\n\
a=ssrc:3335134180 cname:{6a2c5e0c-02b1-4a4e-b8fb-1d6c2b3f1c5e}\r\n\
a=ssrc:1617180245 cname:{6a2c5e0c-02b1-4a4e-b8fb-1d6c2b3f1c5e}\r\n";

#[test]
fn test_write_reproduces_canonical_input() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("rconf_sdp_core=trace")
        .try_init();

    let session: SessionDescription = FIREFOX_LIKE.parse().unwrap();
    assert_eq!(session.to_string(), FIREFOX_LIKE);
}

#[test]
fn test_media_order_matches_bundle() {
    let session: SessionDescription = FIREFOX_LIKE.parse().unwrap();
    let mids: Vec<String> = session
        .media
        .iter()
        .filter_map(|m| m.mid().map(str::to_string))
        .collect();
    assert_eq!(session.bundle_group(), Some(mids));
}

#[test]
fn test_mutations_survive_serialization() {
    let mut session: SessionDescription = FIREFOX_LIKE.parse().unwrap();
    let video = session.require_media_mut(&MediaType::Video).unwrap();
    assert_eq!(video.primary_video_ssrc().unwrap(), Some(3335134180));

    video.set_direction(MediaDirection::SendRecv);
    video.add_ssrc_attribute(SsrcRecord::new(3335134180, "msid", "stream track"));
    video.add_group(SsrcGroup::new("SIM", vec![3335134180]));

    let reparsed: SessionDescription = session.to_string().parse().unwrap();
    let video = reparsed.select_media(&MediaType::Video).unwrap();
    assert_eq!(video.direction, Some(MediaDirection::SendRecv));
    assert_eq!(video.ssrc_attribute_value(3335134180, "msid"), Some("stream track"));
    assert_eq!(video.find_groups("SIM").len(), 1);
    assert_eq!(video.ssrc_count(), 2);
}

#[test]
fn test_missing_media_type_is_an_error() {
    let mut session: SessionDescription = "v=0\r\nm=audio 9 RTP/AVPF 0\r\n".parse().unwrap();
    assert!(session.require_media_mut(&MediaType::Video).is_err());
}

#[test]
fn test_prefer_h264_in_parsed_description() {
    let mut session: SessionDescription = FIREFOX_LIKE.parse().unwrap();
    let video = session.require_media_mut(&MediaType::Video).unwrap();
    assert!(prefer_video_codec(video, "H264"));
    assert_eq!(video.formats[0], "126");
    assert_eq!(video.formats[1..].to_vec(), vec!["120", "124", "121", "125", "127", "97", "98"]);
}

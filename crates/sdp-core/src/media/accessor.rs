//! SSRC and SSRC-group operations on a single media section.
//!
//! All mutating operations act in place on the borrowed [`MediaSection`].

use tracing::debug;

use crate::error::{Error, Result};
use crate::session::MediaSection;
use crate::types::{MediaType, SsrcGroup, SsrcRecord, FID_SEMANTICS, SIM_SEMANTICS};

impl MediaSection {
    /// Distinct ssrc ids in first-seen order
    pub fn ssrc_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = Vec::new();
        for record in &self.ssrcs {
            if !ids.contains(&record.id) {
                ids.push(record.id);
            }
        }
        ids
    }

    /// Number of distinct ssrc ids (not the number of records)
    pub fn ssrc_count(&self) -> usize {
        self.ssrc_ids().len()
    }

    /// Whether any record references the ssrc
    pub fn contains_ssrc(&self, ssrc: u32) -> bool {
        self.ssrcs.iter().any(|r| r.id == ssrc)
    }

    /// Value of the first `<attribute>` record for the ssrc
    pub fn ssrc_attribute_value(&self, ssrc: u32, attribute: &str) -> Option<&str> {
        self.ssrcs
            .iter()
            .find(|r| r.id == ssrc && r.attribute == attribute)
            .and_then(|r| r.value.as_deref())
    }

    /// Append a record. Existing records for the same pair are not replaced.
    pub fn add_ssrc_attribute(&mut self, record: SsrcRecord) {
        self.ssrcs.push(record);
    }

    /// Remove every record of the ssrc
    pub fn remove_ssrc(&mut self, ssrc: u32) {
        self.ssrcs.retain(|r| r.id != ssrc);
    }

    /// Rename an ssrc in every record and group
    pub fn replace_ssrc(&mut self, old_ssrc: u32, new_ssrc: u32) {
        for record in self.ssrcs.iter_mut().filter(|r| r.id == old_ssrc) {
            record.id = new_ssrc;
        }
        for group in &mut self.ssrc_groups {
            for member in group.ssrcs.iter_mut().filter(|s| **s == old_ssrc) {
                *member = new_ssrc;
            }
        }
    }

    /// First ssrc whose `msid` record equals the given value
    pub fn find_ssrc_by_msid(&self, msid: &str) -> Option<u32> {
        self.ssrcs
            .iter()
            .find(|r| r.attribute == "msid" && r.value.as_deref() == Some(msid))
            .map(|r| r.id)
    }

    /// Whether the section carries any ssrc-group
    pub fn contains_any_groups(&self) -> bool {
        !self.ssrc_groups.is_empty()
    }

    /// First group with the semantics, optionally requiring an exact member list
    pub fn find_group(&self, semantics: &str, ssrcs: Option<&[u32]>) -> Option<&SsrcGroup> {
        self.ssrc_groups.iter().find(|g| {
            g.semantics == semantics && ssrcs.map_or(true, |members| g.ssrcs.as_slice() == members)
        })
    }

    /// All groups with the semantics
    pub fn find_groups(&self, semantics: &str) -> Vec<&SsrcGroup> {
        self.ssrc_groups
            .iter()
            .filter(|g| g.semantics == semantics)
            .collect()
    }

    /// Group with the semantics whose first member is `primary`
    pub fn find_group_by_primary(&self, semantics: &str, primary: u32) -> Option<&SsrcGroup> {
        self.ssrc_groups
            .iter()
            .find(|g| g.semantics == semantics && g.primary() == Some(primary))
    }

    /// RTX ssrc paired with `primary` through an FID group
    pub fn rtx_ssrc(&self, primary: u32) -> Option<u32> {
        self.find_group_by_primary(FID_SEMANTICS, primary)
            .and_then(SsrcGroup::secondary)
    }

    /// Append a group
    pub fn add_group(&mut self, group: SsrcGroup) {
        self.ssrc_groups.push(group);
    }

    /// Remove every group that has the ssrc as a member
    pub fn remove_groups_with_ssrc(&mut self, ssrc: u32) {
        self.ssrc_groups.retain(|g| !g.ssrcs.contains(&ssrc));
    }

    /// Remove every group with the semantics
    pub fn remove_groups_by_semantics(&mut self, semantics: &str) {
        self.ssrc_groups.retain(|g| g.semantics != semantics);
    }

    fn ensure_video(&self) -> Result<()> {
        if self.media_type != MediaType::Video {
            return Err(Error::InvalidSectionType {
                expected: MediaType::Video,
                actual: self.media_type.clone(),
            });
        }
        Ok(())
    }

    /// Primary video ssrcs: every distinct ssrc that is not the secondary of an FID group
    pub fn primary_video_ssrcs(&self) -> Result<Vec<u32>> {
        self.ensure_video()?;

        let mut ssrcs = self.ssrc_ids();
        if ssrcs.len() == 1 {
            return Ok(ssrcs);
        }
        for group in self.find_groups(FID_SEMANTICS) {
            if let Some(secondary) = group.secondary() {
                ssrcs.retain(|s| *s != secondary);
            }
        }
        Ok(ssrcs)
    }

    /// The single primary video ssrc, or `None` when it cannot be told apart
    ///
    /// One ssrc is the primary. Two ssrcs need exactly one FID group and three or more
    /// need a SIM group; the primary is then the first member of that group.
    pub fn primary_video_ssrc(&self) -> Result<Option<u32>> {
        self.ensure_video()?;

        let primary = match self.ssrc_count() {
            0 => None,
            1 => self.ssrcs.first().map(|r| r.id),
            2 => match self.find_groups(FID_SEMANTICS).as_slice() {
                [group] => group.primary(),
                _ => None,
            },
            _ => self.find_group(SIM_SEMANTICS, None).and_then(SsrcGroup::primary),
        };
        if primary.is_none() {
            debug!("Unable to determine the primary video ssrc of {} ssrcs", self.ssrc_count());
        }
        Ok(primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sdp;

    fn video(ssrc_lines: &str) -> MediaSection {
        let sdp = format!("v=0\r\nm=video 9 RTP/AVPF 100\r\na=sendrecv\r\n{}", ssrc_lines);
        parse_sdp(&sdp).unwrap().media.remove(0)
    }

    #[test]
    fn test_ssrc_count_counts_distinct_ids() {
        let section = video("a=ssrc:1 cname:a\r\na=ssrc:1 msid:s t\r\na=ssrc:2 cname:a\r\n");
        assert_eq!(section.ssrcs.len(), 3);
        assert_eq!(section.ssrc_count(), 2);
        assert_eq!(section.ssrc_ids(), vec![1, 2]);
    }

    #[test]
    fn test_attribute_lookup_and_removal() {
        let mut section = video("a=ssrc:1 cname:a\r\na=ssrc:1 msid:s t\r\na=ssrc:2 cname:b\r\n");
        assert_eq!(section.ssrc_attribute_value(1, "msid"), Some("s t"));
        assert_eq!(section.ssrc_attribute_value(2, "msid"), None);
        assert_eq!(section.find_ssrc_by_msid("s t"), Some(1));

        section.remove_ssrc(1);
        assert!(!section.contains_ssrc(1));
        assert!(section.contains_ssrc(2));
    }

    #[test]
    fn test_group_queries() {
        let section = video(
            "a=ssrc-group:SIM 1 2 3\r\na=ssrc-group:FID 1 4\r\na=ssrc-group:FID 2 5\r\na=ssrc:1 cname:a\r\n",
        );
        assert_eq!(section.find_groups("FID").len(), 2);
        assert!(section.find_group("SIM", Some(&[1, 2, 3])).is_some());
        assert!(section.find_group("SIM", Some(&[1, 2])).is_none());
        assert_eq!(section.rtx_ssrc(2), Some(5));
        assert_eq!(section.rtx_ssrc(3), None);
    }

    #[test]
    fn test_group_removal() {
        let mut section = video("a=ssrc-group:SIM 1 2 3\r\na=ssrc-group:FID 1 4\r\na=ssrc-group:FID 2 5\r\n");
        section.remove_groups_with_ssrc(4);
        assert_eq!(section.ssrc_groups.len(), 2);
        section.remove_groups_by_semantics("FID");
        assert_eq!(section.ssrc_groups, vec![SsrcGroup::new("SIM", vec![1, 2, 3])]);
    }

    #[test]
    fn test_replace_ssrc_renames_records_and_groups() {
        let mut section = video("a=ssrc-group:FID 1 2\r\na=ssrc:1 cname:a\r\na=ssrc:2 cname:a\r\n");
        section.replace_ssrc(1, 10);
        assert_eq!(section.ssrc_ids(), vec![10, 2]);
        assert_eq!(section.ssrc_groups[0].ssrcs, vec![10, 2]);
    }

    #[test]
    fn test_primary_video_ssrc_single() {
        let section = video("a=ssrc:1 cname:a\r\na=ssrc:1 msid:s t\r\n");
        assert_eq!(section.primary_video_ssrc().unwrap(), Some(1));
    }

    #[test]
    fn test_primary_video_ssrc_fid_pair() {
        let section = video("a=ssrc-group:FID 2 1\r\na=ssrc:1 cname:a\r\na=ssrc:2 cname:a\r\n");
        assert_eq!(section.primary_video_ssrc().unwrap(), Some(2));
    }

    #[test]
    fn test_primary_video_ssrc_needs_a_single_fid_group() {
        let section = video(
            "a=ssrc-group:FID 1 2\r\na=ssrc-group:FID 2 1\r\na=ssrc:1 cname:a\r\na=ssrc:2 cname:a\r\n",
        );
        assert_eq!(section.primary_video_ssrc().unwrap(), None);
    }

    #[test]
    fn test_primary_video_ssrc_simulcast() {
        let section = video(
            "a=ssrc-group:SIM 3 1 2\r\na=ssrc:1 cname:a\r\na=ssrc:2 cname:a\r\na=ssrc:3 cname:a\r\n",
        );
        assert_eq!(section.primary_video_ssrc().unwrap(), Some(3));
    }

    #[test]
    fn test_primary_video_ssrc_ambiguous() {
        let section = video("a=ssrc:1 cname:a\r\na=ssrc:2 cname:a\r\n");
        assert_eq!(section.primary_video_ssrc().unwrap(), None);
    }

    #[test]
    fn test_primary_video_ssrcs_excludes_rtx() {
        let section = video(
            "a=ssrc-group:FID 1 4\r\na=ssrc-group:FID 2 5\r\na=ssrc:1 cname:a\r\na=ssrc:4 cname:a\r\na=ssrc:2 cname:a\r\na=ssrc:5 cname:a\r\n",
        );
        assert_eq!(section.primary_video_ssrcs().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_primary_ssrc_on_audio_is_an_error() {
        let sdp = "v=0\r\nm=audio 9 RTP/AVPF 111\r\na=ssrc:1 cname:a\r\n";
        let section = parse_sdp(sdp).unwrap().media.remove(0);
        assert!(matches!(
            section.primary_video_ssrc(),
            Err(Error::InvalidSectionType { .. })
        ));
        assert!(section.primary_video_ssrcs().is_err());
    }
}

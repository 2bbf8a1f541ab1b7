pub const ACTIVE_CLASS: &str = "active";
pub const ACTIVE_COLOR: &str = "var(--gold)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkMark {
    pub link: usize,
    pub active: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ScrollSpy {
    hrefs: Vec<String>,
}

impl ScrollSpy {
    pub fn new(hrefs: Vec<String>) -> Self {
        Self { hrefs }
    }

    /// Marks every link whose href is `#section_id` and clears the rest.
    pub fn activate(&self, section_id: &str) -> Vec<LinkMark> {
        self.hrefs
            .iter()
            .enumerate()
            .map(|(link, href)| LinkMark {
                link,
                active: href.strip_prefix('#') == Some(section_id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spy() -> ScrollSpy {
        ScrollSpy::new(vec![
            "#about".to_string(),
            "#projects".to_string(),
            "#contact".to_string(),
        ])
    }

    fn active_links(marks: &[LinkMark]) -> Vec<usize> {
        marks
            .iter()
            .filter(|mark| mark.active)
            .map(|mark| mark.link)
            .collect()
    }

    #[test]
    fn exactly_one_matching_link_is_marked() {
        let marks = spy().activate("projects");

        assert_eq!(marks.len(), 3);
        assert_eq!(active_links(&marks), vec![1]);
    }

    #[test]
    fn every_link_to_the_section_is_marked() {
        let spy = ScrollSpy::new(vec![
            "#about".to_string(),
            "#work".to_string(),
            "#about".to_string(),
        ]);

        assert_eq!(active_links(&spy.activate("about")), vec![0, 2]);
    }

    #[test]
    fn unmatched_section_clears_every_link() {
        let marks = spy().activate("footer");
        assert!(active_links(&marks).is_empty());
    }

    #[test]
    fn href_must_be_an_exact_anchor() {
        let spy = ScrollSpy::new(vec!["/#about".to_string(), "#about-me".to_string()]);
        assert!(active_links(&spy.activate("about")).is_empty());
    }
}

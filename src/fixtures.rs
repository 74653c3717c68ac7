//! Test Fixtures

/// Address the fixture page is served from.
pub(crate) const PAGE_URL: &str = "https://nav.test/";

/// Icon URLs referenced by [`DIRECTORY_HTML`], after resolution.
pub(crate) const GITHUB_ICON_URL: &str = "https://nav.test/assets/images/logos/github.png";
pub(crate) const FIGMA_ICON_URL: &str = "https://cdn.test/figma.png";

/// Two categories laid out the way a WebStack page does it.
pub(crate) const DIRECTORY_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head><title>Nav</title></head>
<body>
<div class="main-content">
  <h4 class="text-gray"><i class="linecons-tag" id="Dev Tools"></i>Dev Tools</h4>
  <div class="row">
    <div class="col-sm-3">
      <div class="xe-widget xe-conversations box2 label-info" data-toggle="tooltip" title="" data-original-title="https://github.com">
        <div class="xe-comment-entry">
          <a class="xe-user-img"><img data-src="assets/images/logos/github.png" class="lozad img-circle" width="40"></a>
          <div class="xe-comment">
            <a href="#" class="xe-user-name overflowClip_1"><strong>GitHub</strong></a>
            <p class="overflowClip_2"></p>
          </div>
        </div>
      </div>
    </div>
  </div>
  <br />
  <h4 class="text-gray"><i class="linecons-tag" id="Design"></i>
    Design
  </h4>
  <div class="row">
    <div class="col-sm-3">
      <div class="xe-widget xe-conversations box2 label-info" data-toggle="tooltip" title="" data-original-title="https://figma.com">
        <div class="xe-comment-entry">
          <a class="xe-user-img"><img data-src="https://cdn.test/figma.png" class="lozad img-circle" width="40"></a>
          <div class="xe-comment">
            <a href="#" class="xe-user-name overflowClip_1"><strong>Figma</strong></a>
            <p class="overflowClip_2">Collaborative interface design</p>
          </div>
        </div>
      </div>
    </div>
  </div>
</div>
</body>
</html>
"##;

/// A site card for a generated page.
pub(crate) fn card(name: &str, url: &str, description: &str, icon: &str) -> String {
    format!(
        r##"<div class="col-sm-3"><div class="xe-widget label-info" data-original-title="{url}">
<a class="xe-user-img"><img data-src="{icon}"></a>
<div class="xe-comment"><a href="#"><strong>{name}</strong></a><p>{description}</p></div>
</div></div>"##
    )
}

/// A heading plus row holding `cards`.
pub(crate) fn section(heading: &str, cards: &[String]) -> String {
    format!(
        r##"<h4 class="text-gray">{heading}</h4><div class="row">{}</div><br />"##,
        cards.concat()
    )
}

/// Wrap sections into a full page.
pub(crate) fn page(sections: &[String]) -> String {
    format!(
        r##"<!DOCTYPE html><html><body><div class="main-content">{}</div></body></html>"##,
        sections.concat()
    )
}

// ABOUTME: Default template parts for generated presentations
// ABOUTME: Supplies the theme, slide master, layouts and notes master shared by every deck

use crate::document::{PlaceholderKind, SlideLayout, SlideSize};
use quick_xml::escape::escape;

pub const NS_DECLS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

pub const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Slide master ID; layout IDs follow it
pub const SLIDE_MASTER_ID: u64 = 2_147_483_648;

/// Placeholder indexes shared by the notes master and every notes slide
pub const NOTES_SLIDE_IMAGE_IDX: u32 = 2;
pub const NOTES_BODY_IDX: u32 = 3;

/// Group shape properties every `p:spTree` starts with
pub const GROUP_SHAPE_HEADER: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

/// Position and extent of a placeholder, scaled to the slide height
pub fn placeholder_frame(kind: PlaceholderKind, size: SlideSize) -> (i64, i64, i64, i64) {
    // Geometry of the 4:3 reference template
    let (x, y, cx, cy) = match kind {
        PlaceholderKind::CenterTitle => (685_800, 2_130_425, 7_772_400, 1_470_025),
        PlaceholderKind::Subtitle => (1_371_600, 3_886_200, 6_400_800, 1_752_600),
        PlaceholderKind::Title => (457_200, 274_638, 8_229_600, 1_143_000),
        PlaceholderKind::Body => (457_200, 1_600_200, 8_229_600, 4_525_963),
    };
    let sx = |v: i64| v * size.cx / SlideSize::STANDARD_4X3.cx;
    let sy = |v: i64| v * size.cy / SlideSize::STANDARD_4X3.cy;
    (sx(x), sy(y), sx(cx), sy(cy))
}

fn xfrm(kind: PlaceholderKind, size: SlideSize) -> String {
    let (x, y, cx, cy) = placeholder_frame(kind, size);
    format!(r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#)
}

/// `p:ph` element for a placeholder
pub fn ph_element(kind: PlaceholderKind, idx: u32) -> String {
    if idx == 0 {
        format!(r#"<p:ph type="{}"/>"#, kind.ph_type())
    } else {
        format!(r#"<p:ph type="{}" idx="{}"/>"#, kind.ph_type(), idx)
    }
}

fn prompt_text(kind: PlaceholderKind) -> &'static str {
    match kind {
        PlaceholderKind::CenterTitle | PlaceholderKind::Title => "Click to edit Master title style",
        PlaceholderKind::Subtitle => "Click to edit Master subtitle style",
        PlaceholderKind::Body => "Click to edit Master text styles",
    }
}

/// List style of a template placeholder; subtitles are centered without bullets
fn list_style(kind: PlaceholderKind) -> &'static str {
    match kind {
        PlaceholderKind::Subtitle => {
            r#"<a:lstStyle><a:lvl1pPr marL="0" indent="0" algn="ctr"><a:buNone/></a:lvl1pPr></a:lstStyle>"#
        }
        _ => "<a:lstStyle/>",
    }
}

fn template_shape(id: usize, name: &str, kind: PlaceholderKind, idx: u32, size: SlideSize) -> String {
    let anchor = if kind.is_title() { r#" anchor="ctr""# } else { "" };
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"{anchor}><a:normAutofit/></a:bodyPr>{list_style}<a:p><a:r><a:rPr lang="en-US"/><a:t>{prompt}</a:t></a:r><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#,
        id = id,
        name = escape(name),
        ph = ph_element(kind, idx),
        xfrm = xfrm(kind, size),
        anchor = anchor,
        list_style = list_style(kind),
        prompt = prompt_text(kind),
    )
}

pub fn slide_master_xml(layout_count: usize, size: SlideSize) -> String {
    let layout_ids = (0..layout_count)
        .map(|i| {
            format!(
                r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
                SLIDE_MASTER_ID + 1 + i as u64,
                i + 1
            )
        })
        .collect::<String>();

    format!(
        r#"{decl}
<p:sldMaster {ns}><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{grp}{title}{body}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst>{layout_ids}</p:sldLayoutIdLst><p:txStyles><p:titleStyle><a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/><a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr></a:lvl1pPr></p:titleStyle><p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr><a:lvl2pPr marL="742950" indent="-285750" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8211;"/><a:defRPr sz="2800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl2pPr></p:bodyStyle><p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle></p:txStyles></p:sldMaster>"#,
        decl = XML_DECL,
        ns = NS_DECLS,
        grp = GROUP_SHAPE_HEADER,
        title = template_shape(2, "Title Placeholder 1", PlaceholderKind::Title, 0, size),
        body = template_shape(3, "Text Placeholder 2", PlaceholderKind::Body, 1, size),
        layout_ids = layout_ids,
    )
}

pub fn slide_master_rels_xml(layout_count: usize) -> String {
    let mut rels = String::new();
    for i in 0..layout_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    rels.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>"#,
        layout_count + 1
    ));
    relationships_xml(&rels)
}

pub fn slide_layout_xml(layout: &SlideLayout, size: SlideSize) -> String {
    let shapes = layout
        .placeholders
        .iter()
        .enumerate()
        .map(|(i, spec)| template_shape(i + 2, spec.name, spec.kind, spec.idx, size))
        .collect::<String>();

    format!(
        r#"{decl}
<p:sldLayout {ns} type="{layout_type}" preserve="1"><p:cSld name="{name}"><p:spTree>{grp}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        decl = XML_DECL,
        ns = NS_DECLS,
        layout_type = layout.layout_type,
        name = escape(layout.name),
        grp = GROUP_SHAPE_HEADER,
        shapes = shapes,
    )
}

pub fn slide_layout_rels_xml() -> String {
    relationships_xml(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
    )
}

pub fn notes_master_xml() -> String {
    format!(
        r#"{decl}
<p:notesMaster {ns}><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{grp}<p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr><p:nvPr><p:ph type="sldImg" idx="{image_idx}"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="1143000" y="685800"/><a:ext cx="4572000" cy="3429000"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" sz="quarter" idx="{body_idx}"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="685800" y="4343400"/><a:ext cx="5486400" cy="4114800"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"/><a:lstStyle/><a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master text styles</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:notesStyle><a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:defRPr sz="1200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr></p:notesStyle></p:notesMaster>"#,
        decl = XML_DECL,
        ns = NS_DECLS,
        grp = GROUP_SHAPE_HEADER,
        image_idx = NOTES_SLIDE_IMAGE_IDX,
        body_idx = NOTES_BODY_IDX,
    )
}

pub fn notes_master_rels_xml() -> String {
    relationships_xml(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme2.xml"/>"#,
    )
}

/// Office theme with the standard color, font and format schemes
pub fn theme_xml(name: &str) -> String {
    format!(
        r#"{decl}
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="{name}"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:tint val="50000"/></a:schemeClr></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:shade val="80000"/></a:schemeClr></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln><a:ln w="25400" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln><a:ln w="38100" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/></a:schemeClr></a:solidFill><a:solidFill><a:schemeClr val="phClr"><a:shade val="90000"/></a:schemeClr></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#,
        decl = XML_DECL,
        name = escape(name),
    )
}

pub fn pres_props_xml() -> String {
    format!(
        r#"{}
<p:presentationPr {}/>"#,
        XML_DECL, NS_DECLS
    )
}

pub fn view_props_xml() -> String {
    format!(
        r#"{}
<p:viewPr {}><p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#,
        XML_DECL, NS_DECLS
    )
}

pub fn table_styles_xml() -> String {
    format!(
        r#"{}
<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
        XML_DECL
    )
}

/// Wrap relationship elements in a `Relationships` part
pub fn relationships_xml(relationships: &str) -> String {
    format!(
        r#"{}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        XML_DECL, relationships
    )
}

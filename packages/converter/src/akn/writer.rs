//! Serialization of document trees to AKN XML files.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::tree::Element;
use crate::config::output_file_name;
use crate::error::Result;

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name);
    for (name, value) in &element.attributes {
        start.push_attribute((*name, value.as_str()));
    }

    if element.text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name)))?;
    Ok(())
}

/// Serialize a tree: XML declaration, then the tree with two-space indentation.
pub fn to_xml_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    let xml = String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(xml)
}

/// Save the document of a title as `us-ga-title-<NN>.akn.xml`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// A failure leaves no partial output file behind.
///
/// # Arguments
/// * `root` - Document tree to save
/// * `output_dir` - Existing directory to write into
/// * `title` - Title number, used for the file name
///
/// # Returns
/// Path to the written file
pub fn save_document(root: &Element, output_dir: &Path, title: u32) -> Result<PathBuf> {
    let file_name = output_file_name(title);
    let output_file = output_dir.join(&file_name);
    let temp_file = output_dir.join(format!(".{file_name}.tmp"));

    let content = to_xml_string(root)?;

    let written = (|| -> Result<()> {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        Ok(())
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_file);
        return Err(e);
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;

    tracing::debug!(path = %output_file.display(), bytes = content.len(), "Wrote document");
    Ok(output_file)
}

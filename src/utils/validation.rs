use crate::core::ConversionRequest;
use crate::utils::{ConvertError, ConvertResult};

/// Validates a conversion request before any record is touched
pub fn validate_request(request: &ConversionRequest) -> ConvertResult<()> {
    if request.source.as_str().trim().is_empty() {
        return Err(ConvertError::invalid_request("Source directory is empty"));
    }

    validate_quality(request.quality)?;
    validate_folder_name(&request.output_folder)?;
    Ok(())
}

/// Quality must be within 0-100
pub fn validate_quality(quality: u8) -> ConvertResult<()> {
    if quality > 100 {
        return Err(ConvertError::invalid_request(format!(
            "Invalid quality value: {}. Must be between 0 and 100", quality
        )));
    }
    Ok(())
}

/// Output folder must be a single plain path component
pub fn validate_folder_name(name: &str) -> ConvertResult<()> {
    if name.trim().is_empty() {
        return Err(ConvertError::invalid_request("Output folder name is empty"));
    }

    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConvertError::invalid_request(format!(
            "Output folder must be a plain folder name: {}", name
        )));
    }

    Ok(())
}

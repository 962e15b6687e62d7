//! DynamoDB error mapping.
//!
//! Maps AWS SDK scan errors to `ScanError` from `dynavalve_core::scan`. Every
//! failure of the remote call becomes an I/O failure so that a retry layer can
//! decide whether to reissue it.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::scan::ScanError as SdkScanError;
use dynavalve_core::scan::ScanError;

/// Map a Scan SDK error to ScanError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<SdkScanError, R>,
    table: &str,
) -> ScanError {
    let message = match err.into_service_error() {
        SdkScanError::ResourceNotFoundException(_) => "Table not found".to_string(),
        SdkScanError::ProvisionedThroughputExceededException(_) => {
            "Throughput exceeded, please retry".to_string()
        }
        SdkScanError::RequestLimitExceeded(_) => "Request limit exceeded, please retry".to_string(),
        SdkScanError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        err => format!("Scan failed: {:?}", err),
    };
    ScanError::io("scan", table, message)
}

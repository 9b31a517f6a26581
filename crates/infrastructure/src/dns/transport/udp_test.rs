use super::*;

fn addr() -> SocketAddr {
    "192.0.2.53:53".parse().unwrap()
}

#[test]
fn test_validate_response_id_matching_ids_ok() {
    let query = [0xAB, 0xCD, 0x01, 0x00];
    let response = [0xAB, 0xCD, 0x81, 0x80];
    assert!(validate_response_id(&query, &response, addr()).is_ok());
}

#[test]
fn test_validate_response_id_mismatch_returns_error() {
    let query = [0xAB, 0xCD, 0x01, 0x00];
    let response = [0x12, 0x34, 0x81, 0x80];
    let result = validate_response_id(&query, &response, addr());
    assert!(result.is_err(), "Mismatched DNS IDs must return an error");
    let err = result.unwrap_err().to_string();
    assert!(
        err.contains("mismatch"),
        "Error message should mention mismatch: {}",
        err
    );
}

#[test]
fn test_validate_response_id_short_query_returns_error() {
    let query = [0xAB];
    let response = [0xAB, 0xCD, 0x81, 0x80];
    assert!(validate_response_id(&query, &response, addr()).is_err());
}

#[test]
fn test_validate_response_id_short_response_returns_error() {
    let query = [0xAB, 0xCD, 0x01, 0x00];
    let response = [0xAB];
    assert!(validate_response_id(&query, &response, addr()).is_err());
}

#[tokio::test]
async fn test_silent_server_times_out() {
    // Bound but never answers.
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let transport = UdpTransport::new(silent.local_addr().unwrap());

    let err = transport
        .send(&[0xAB, 0xCD, 0x01, 0x00], Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {}", err);
}

#[test]
fn test_transport_keeps_server_addr() {
    let transport = UdpTransport::new("[2001:db8::53]:53".parse().unwrap());
    assert_eq!(
        transport.server_addr(),
        "[2001:db8::53]:53".parse::<SocketAddr>().unwrap()
    );
}

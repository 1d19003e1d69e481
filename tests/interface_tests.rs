use lanping::errors::NetworkDiscoveryError;
use lanping::net::interface::{detect_subnet, network_cidr, select_subnet, InterfaceEntry};
use std::net::Ipv4Addr;
use test_utils::{create_test_interface, StaticInterfaces};


fn loopback() -> InterfaceEntry {
    InterfaceEntry {
        is_loopback: true,
        ..create_test_interface("lo", &["127.0.0.1/8"])
    }
}

#[test]
fn test_network_cidr_masks_host_bits() {
    assert_eq!(network_cidr(Ipv4Addr::new(192, 168, 1, 42), 24).unwrap(), "192.168.1.0/24");
    assert_eq!(network_cidr(Ipv4Addr::new(10, 20, 30, 40), 16).unwrap(), "10.20.0.0/16");
    assert_eq!(network_cidr(Ipv4Addr::new(172, 16, 5, 130), 25).unwrap(), "172.16.5.128/25");
}

#[test]
fn test_network_cidr_rejects_bad_prefix() {
    assert!(network_cidr(Ipv4Addr::new(10, 0, 0, 1), 33).is_err());
}

#[test]
fn test_first_usable_interface_wins() {
    let interfaces = vec![
        loopback(),
        create_test_interface("eth0", &["192.168.1.42/24"]),
        create_test_interface("wlan0", &["10.0.0.5/8"]),
    ];

    let subnet = select_subnet(&interfaces, None).unwrap();
    assert_eq!(subnet.cidr, "192.168.1.0/24");
    assert_eq!(subnet.interface, "eth0");
    assert_eq!(subnet.address, Ipv4Addr::new(192, 168, 1, 42));
}

#[test]
fn test_down_interface_skipped() {
    let mut down = create_test_interface("eth0", &["192.168.1.42/24"]);
    down.is_up = false;
    let interfaces = vec![down, create_test_interface("wlan0", &["10.0.0.5/8"])];

    let subnet = select_subnet(&interfaces, None).unwrap();
    assert_eq!(subnet.interface, "wlan0");
    assert_eq!(subnet.cidr, "10.0.0.0/8");
}

#[test]
fn test_ipv6_and_link_local_addresses_skipped() {
    let interfaces = vec![
        create_test_interface("eth0", &["fe80::1/64", "169.254.10.20/16"]),
        create_test_interface("eth1", &["fe80::2/64", "169.254.3.4/16", "192.168.7.9/24"]),
    ];

    let subnet = select_subnet(&interfaces, None).unwrap();
    assert_eq!(subnet.interface, "eth1");
    assert_eq!(subnet.cidr, "192.168.7.0/24");
}

#[test]
fn test_preferred_interface_only() {
    let interfaces = vec![
        create_test_interface("eth0", &["192.168.1.42/24"]),
        create_test_interface("en5", &["10.1.2.3/24"]),
    ];

    let subnet = select_subnet(&interfaces, Some("en5")).unwrap();
    assert_eq!(subnet.interface, "en5");
    assert_eq!(subnet.cidr, "10.1.2.0/24");
}

#[test]
fn test_empty_preferred_name_means_any() {
    let interfaces = vec![create_test_interface("eth0", &["192.168.1.42/24"])];
    assert_eq!(select_subnet(&interfaces, Some("")).unwrap().interface, "eth0");
}

#[test]
fn test_preferred_interface_missing() {
    let interfaces = vec![create_test_interface("eth0", &["192.168.1.42/24"])];

    let err = select_subnet(&interfaces, Some("en9")).unwrap_err();
    assert!(matches!(err, NetworkDiscoveryError::InterfaceNotFound(ref name) if name == "en9"));
}

#[test]
fn test_preferred_interface_without_ipv4() {
    let interfaces = vec![create_test_interface("eth0", &["fe80::1/64"])];

    let err = select_subnet(&interfaces, Some("eth0")).unwrap_err();
    assert!(matches!(err, NetworkDiscoveryError::InterfaceNotFound(_)));
}

#[test]
fn test_preferred_loopback_not_usable() {
    let err = select_subnet(&[loopback()], Some("lo")).unwrap_err();
    assert!(matches!(err, NetworkDiscoveryError::InterfaceNotFound(_)));
}

#[test]
fn test_nothing_suitable() {
    let err = select_subnet(&[loopback()], None).unwrap_err();
    assert!(matches!(err, NetworkDiscoveryError::NoSuitableInterface));

    let err = select_subnet(&[], None).unwrap_err();
    assert!(matches!(err, NetworkDiscoveryError::NoSuitableInterface));
}

#[test]
fn test_enumeration_failure_propagates() {
    let source = StaticInterfaces(Err("getifaddrs failed".to_string()));

    let err = detect_subnet(&source, None).unwrap_err();
    assert!(matches!(err, NetworkDiscoveryError::InterfaceEnumeration(_)));
    assert!(err.to_string().contains("getifaddrs failed"));
}

#[test]
fn test_detect_subnet_from_source() {
    let source = StaticInterfaces(Ok(vec![create_test_interface("eth0", &["192.168.1.42/24"])]));
    assert_eq!(detect_subnet(&source, None).unwrap().cidr, "192.168.1.0/24");
}
